use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use validator::Validate;

use crate::domain::tag::Tag as DomainTag;
use crate::domain::tagged_item::{
    NewTaggedItem as DomainNewTaggedItem, TaggedItem as DomainTaggedItem, TaggedItemListQuery,
    TaggedObject,
};
use crate::models::content_type::{ContentType as DbContentType, NewContentType};
use crate::models::tag::Tag as DbTag;
use crate::models::tagged_item::{NewTaggedItem as DbNewTaggedItem, TaggedItem as DbTaggedItem};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::registry::TypeRegistry;
use crate::repository::{DieselRepository, TaggedItemReader, TaggedItemWriter};

impl TaggedItemReader for DieselRepository {
    fn list_tagged_items(
        &self,
        query: TaggedItemListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainTaggedItem>)> {
        use crate::schema::{content_types, tagged_items};

        let mut conn = self.conn()?;

        let mut count_query = tagged_items::table
            .inner_join(content_types::table)
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(tag_id) = query.tag_id {
            count_query = count_query.filter(tagged_items::tag_id.eq(tag_id));
        }

        if let Some(entity) = query.entity.as_ref() {
            count_query = count_query.filter(content_types::entity.eq(entity));
        }

        if let Some(object_id) = query.object_id {
            count_query = count_query.filter(tagged_items::object_id.eq(object_id));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = tagged_items::table
            .inner_join(content_types::table)
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(tag_id) = query.tag_id {
            items = items.filter(tagged_items::tag_id.eq(tag_id));
        }

        if let Some(entity) = query.entity.as_ref() {
            items = items.filter(content_types::entity.eq(entity));
        }

        if let Some(object_id) = query.object_id {
            items = items.filter(tagged_items::object_id.eq(object_id));
        }

        items = items.order(tagged_items::id.asc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let rows = items
            .select((DbTaggedItem::as_select(), DbContentType::as_select()))
            .load::<(DbTaggedItem, DbContentType)>(&mut conn)?;

        Ok((total, rows.into_iter().map(Into::into).collect()))
    }

    fn tags_for(&self, entity: &str, object_id: i32) -> RepositoryResult<Vec<DomainTag>> {
        use crate::schema::{content_types, tagged_items, tags};

        let mut conn = self.conn()?;

        let rows = tagged_items::table
            .inner_join(tags::table)
            .inner_join(content_types::table)
            .filter(content_types::entity.eq(entity))
            .filter(tagged_items::object_id.eq(object_id))
            .order(tags::label.asc())
            .select(DbTag::as_select())
            .load::<DbTag>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn resolve_tagged_item(
        &self,
        registry: &TypeRegistry,
        tagged_item_id: i32,
    ) -> RepositoryResult<Option<TaggedObject>> {
        use crate::schema::{content_types, tagged_items};

        let mut conn = self.conn()?;

        let row = tagged_items::table
            .inner_join(content_types::table)
            .filter(tagged_items::id.eq(tagged_item_id))
            .select((DbTaggedItem::as_select(), DbContentType::as_select()))
            .first::<(DbTaggedItem, DbContentType)>(&mut conn)
            .optional()?;

        let Some((item, content_type)) = row else {
            return Err(RepositoryError::NotFound);
        };

        let resolver = registry
            .resolver(&content_type.entity)
            .ok_or_else(|| RepositoryError::UnknownEntityKind(content_type.entity.clone()))?;

        let resolved = resolver.fetch_by_id(&mut conn, item.object_id)?;
        if resolved.is_none() {
            // Deleting a tagged object does not cascade here, so the
            // reference can legitimately point at nothing.
            log::debug!(
                "tagged item {} references missing {} {}",
                item.id,
                content_type.entity,
                item.object_id
            );
        }

        Ok(resolved)
    }

    fn list_entity_kinds(&self) -> RepositoryResult<Vec<String>> {
        use crate::schema::content_types;

        let mut conn = self.conn()?;
        let kinds = content_types::table
            .order(content_types::entity.asc())
            .select(content_types::entity)
            .load::<String>(&mut conn)?;

        Ok(kinds)
    }
}

impl TaggedItemWriter for DieselRepository {
    fn create_tagged_item(
        &self,
        new_item: &DomainNewTaggedItem,
    ) -> RepositoryResult<DomainTaggedItem> {
        use crate::schema::tagged_items;

        new_item.validate()?;

        let mut conn = self.conn()?;

        let content_type = lookup_content_type(&mut conn, &new_item.entity)?
            .ok_or_else(|| RepositoryError::UnknownEntityKind(new_item.entity.clone()))?;

        let insertable = DbNewTaggedItem {
            tag_id: new_item.tag_id,
            content_type_id: content_type.id,
            object_id: new_item.object_id,
        };

        let created = diesel::insert_into(tagged_items::table)
            .values(&insertable)
            .get_result::<DbTaggedItem>(&mut conn)?;

        Ok((created, content_type).into())
    }

    fn delete_tagged_item(&self, tagged_item_id: i32) -> RepositoryResult<()> {
        use crate::schema::tagged_items;

        let mut conn = self.conn()?;
        let target = tagged_items::table.filter(tagged_items::id.eq(tagged_item_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn register_entity_kind(&self, entity: &str) -> RepositoryResult<()> {
        use crate::schema::content_types;

        let mut conn = self.conn()?;

        diesel::insert_into(content_types::table)
            .values(&NewContentType { entity })
            .on_conflict_do_nothing()
            .execute(&mut conn)?;

        Ok(())
    }
}

fn lookup_content_type(
    conn: &mut SqliteConnection,
    entity: &str,
) -> RepositoryResult<Option<DbContentType>> {
    use crate::schema::content_types;

    let content_type = content_types::table
        .filter(content_types::entity.eq(entity))
        .first::<DbContentType>(conn)
        .optional()?;

    Ok(content_type)
}
