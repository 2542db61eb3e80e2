//! SeaORM queries for the reference-data lookups.

use sea_orm::sea_query::{Expr, Order};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select,
};

use crate::entities::{categories, products, staple_definitions, units};

/// Locale whose text orders units by name. Ordering the jsonb map itself
/// would compare key counts before any text.
pub const NAME_SORT_LOCALE: &str = "en";

fn units_query() -> Select<units::Entity> {
    units::Entity::find()
        .order_by_asc(units::Column::UnitType)
        .order_by(
            Expr::cust(format!(r#""units"."name" ->> '{NAME_SORT_LOCALE}'"#)),
            Order::Asc,
        )
        .order_by_asc(units::Column::Id)
}

/// All units ordered by type, then English name, then id.
pub async fn find_all_units<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<units::Model>, DbErr> {
    units_query().all(conn).await
}

/// All categories ordered by display order; id breaks ties.
pub async fn find_all_categories<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<categories::Model>, DbErr> {
    categories::Entity::find()
        .order_by_asc(categories::Column::DisplayOrder)
        .order_by_asc(categories::Column::Id)
        .all(conn)
        .await
}

/// Active staple definitions inner-joined to their catalog product.
pub async fn find_active_staples_with_product<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(staple_definitions::Model, products::Model)>, DbErr> {
    let rows = staple_definitions::Entity::find()
        .filter(staple_definitions::Column::IsActive.eq(true))
        .join(
            JoinType::InnerJoin,
            staple_definitions::Relation::Products.def(),
        )
        .select_also(products::Entity)
        .order_by_asc(staple_definitions::Column::Id)
        .all(conn)
        .await?;

    // The inner join guarantees a product; the Option comes from select_also.
    Ok(rows
        .into_iter()
        .filter_map(|(staple, product)| product.map(|product| (staple, product)))
        .collect())
}
