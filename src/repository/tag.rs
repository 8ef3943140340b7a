use diesel::prelude::*;

use crate::domain::tag::{
    NewTag as DomainNewTag, Tag as DomainTag, TagListQuery, UpdateTag as DomainUpdateTag,
};
use crate::models::tag::{NewTag as DbNewTag, Tag as DbTag, UpdateTag as DbUpdateTag};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, TagReader, TagWriter};

impl TagReader for DieselRepository {
    fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<DomainTag>> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let tag = tags::table
            .filter(tags::id.eq(id))
            .first::<DbTag>(&mut conn)
            .optional()?;

        Ok(tag.map(Into::into))
    }

    fn list_tags(&self, query: TagListQuery) -> RepositoryResult<(usize, Vec<DomainTag>)> {
        use crate::schema::tags;

        let mut conn = self.conn()?;

        let mut count_query = tags::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(search) = query.search.as_ref() {
            let pattern = format!("%{}%", search);
            count_query = count_query.filter(tags::label.like(pattern));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items_query = tags::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(search) = query.search.as_ref() {
            let pattern = format!("%{}%", search);
            items_query = items_query.filter(tags::label.like(pattern));
        }

        items_query = items_query.order(tags::label.asc());

        if let Some(pagination) = &query.pagination {
            items_query = items_query
                .offset(pagination.offset())
                .limit(pagination.limit());
        }

        let db_tags = items_query.load::<DbTag>(&mut conn)?;
        let tags = db_tags.into_iter().map(DomainTag::from).collect();

        Ok((total, tags))
    }
}

impl TagWriter for DieselRepository {
    fn create_tag(&self, new_tag: &DomainNewTag) -> RepositoryResult<DomainTag> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let insertable = DbNewTag::from(new_tag);

        let created = diesel::insert_into(tags::table)
            .values(&insertable)
            .get_result::<DbTag>(&mut conn)?;

        Ok(created.into())
    }

    fn update_tag(&self, tag_id: i32, updates: &DomainUpdateTag) -> RepositoryResult<DomainTag> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateTag::from(updates);

        let target = tags::table.filter(tags::id.eq(tag_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbTag>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_tag(&self, tag_id: i32) -> RepositoryResult<()> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let target = tags::table.filter(tags::id.eq(tag_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
