use diesel::prelude::*;

use crate::domain::tagged_item::TaggedItem as DomainTaggedItem;
use crate::models::content_type::ContentType;
use crate::models::tag::Tag;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::tagged_items)]
#[diesel(belongs_to(Tag, foreign_key = tag_id))]
#[diesel(belongs_to(ContentType, foreign_key = content_type_id))]
pub struct TaggedItem {
    pub id: i32,
    pub tag_id: i32,
    pub content_type_id: i32,
    pub object_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tagged_items)]
pub struct NewTaggedItem {
    pub tag_id: i32,
    pub content_type_id: i32,
    pub object_id: i32,
}

/// The kind key lives on the registry row, so a domain tagged item is
/// assembled from the joined pair.
impl From<(TaggedItem, ContentType)> for DomainTaggedItem {
    fn from((item, content_type): (TaggedItem, ContentType)) -> Self {
        Self {
            id: item.id,
            tag_id: item.tag_id,
            entity: content_type.entity,
            object_id: item.object_id,
        }
    }
}
