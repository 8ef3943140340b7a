use diesel::prelude::*;

/// Registry row naming one taggable entity kind. The table is seeded
/// with the core kinds by the initial migration; additional kinds are
/// inserted through the repository at startup.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::content_types)]
pub struct ContentType {
    pub id: i32,
    pub entity: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::content_types)]
pub struct NewContentType<'a> {
    pub entity: &'a str,
}
