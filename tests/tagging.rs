use storefront::domain::collection::NewCollection;
use storefront::domain::product::NewProduct;
use storefront::domain::tag::{NewTag, TagListQuery};
use storefront::domain::tagged_item::{NewTaggedItem, TaggedItemListQuery, TaggedObject};
use storefront::repository::errors::RepositoryError;
use storefront::repository::registry::TypeRegistry;
use storefront::repository::{
    CollectionWriter, DieselRepository, ProductReader, ProductWriter, TagReader, TagWriter,
    TaggedItemReader, TaggedItemWriter,
};

mod common;

fn seed_product(repo: &DieselRepository, title: &str) -> storefront::domain::product::Product {
    let collection = repo
        .create_collection(&NewCollection::new("Everything"))
        .expect("create collection");
    repo.create_product(&NewProduct::new(title, 500, collection.id))
        .expect("create product")
}

#[test]
fn test_tagged_item_round_trip() {
    let test_db = common::TestDb::new("test_tagged_item_round_trip.db");
    let repo = DieselRepository::new(test_db.pool());
    let registry = TypeRegistry::with_default_kinds();

    let product = seed_product(&repo, "Coffee");
    let tag = repo.create_tag(&NewTag::new("fresh")).unwrap();

    let item = repo
        .create_tagged_item(&NewTaggedItem::new(tag.id, "product", product.id))
        .unwrap();
    assert_eq!(item.entity, "product");
    assert_eq!(item.object_id, product.id);

    let resolved = repo
        .resolve_tagged_item(&registry, item.id)
        .unwrap()
        .expect("target exists");
    assert_eq!(resolved.kind(), "product");

    let expected = repo.get_product_by_id(product.id).unwrap().unwrap();
    assert_eq!(resolved, TaggedObject::Product(expected));
}

#[test]
fn test_tag_delete_cascades_tagged_items() {
    let test_db = common::TestDb::new("test_tag_delete_cascades_tagged_items.db");
    let repo = DieselRepository::new(test_db.pool());

    let product = seed_product(&repo, "Coffee");
    let tag = repo.create_tag(&NewTag::new("fresh")).unwrap();

    repo.create_tagged_item(&NewTaggedItem::new(tag.id, "product", product.id))
        .unwrap();
    repo.create_tagged_item(&NewTaggedItem::new(tag.id, "collection", 1))
        .unwrap();

    let (total, _) = repo
        .list_tagged_items(TaggedItemListQuery::new().for_tag(tag.id))
        .unwrap();
    assert_eq!(total, 2);

    repo.delete_tag(tag.id).unwrap();

    let (total_after, items_after) = repo.list_tagged_items(TaggedItemListQuery::new()).unwrap();
    assert_eq!(total_after, 0);
    assert!(items_after.is_empty());

    // The tagged objects themselves are untouched.
    assert!(repo.get_product_by_id(product.id).unwrap().is_some());
}

#[test]
fn test_deleting_target_leaves_dangling_reference() {
    let test_db = common::TestDb::new("test_deleting_target_leaves_dangling_reference.db");
    let repo = DieselRepository::new(test_db.pool());
    let registry = TypeRegistry::with_default_kinds();

    let product = seed_product(&repo, "Coffee");
    let tag = repo.create_tag(&NewTag::new("fresh")).unwrap();

    let item = repo
        .create_tagged_item(&NewTaggedItem::new(tag.id, "product", product.id))
        .unwrap();

    repo.delete_product(product.id).unwrap();

    // The reference survives the target.
    let (total, items) = repo
        .list_tagged_items(TaggedItemListQuery::new().object("product", product.id))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, item.id);

    // Resolution degrades to "not found" rather than an error.
    let resolved = repo.resolve_tagged_item(&registry, item.id).unwrap();
    assert!(resolved.is_none());
}

#[test]
fn test_unknown_entity_kind_is_rejected() {
    let test_db = common::TestDb::new("test_unknown_entity_kind_is_rejected.db");
    let repo = DieselRepository::new(test_db.pool());
    let registry = TypeRegistry::with_default_kinds();

    let tag = repo.create_tag(&NewTag::new("watch-later")).unwrap();

    let err = repo
        .create_tagged_item(&NewTaggedItem::new(tag.id, "video", 1))
        .expect_err("unregistered kind must be rejected");
    assert!(matches!(err, RepositoryError::UnknownEntityKind(kind) if kind == "video"));

    // Persisting the descriptor allows the item to be stored...
    repo.register_entity_kind("video").unwrap();
    repo.register_entity_kind("video").unwrap(); // idempotent
    let item = repo
        .create_tagged_item(&NewTaggedItem::new(tag.id, "video", 1))
        .unwrap();

    let kinds = repo.list_entity_kinds().unwrap();
    assert!(kinds.iter().any(|kind| kind == "video"));
    assert_eq!(kinds.len(), 10);

    // ...but resolution still requires a resolver for the kind.
    let err = repo
        .resolve_tagged_item(&registry, item.id)
        .expect_err("no resolver registered for video");
    assert!(matches!(err, RepositoryError::UnknownEntityKind(kind) if kind == "video"));
}

#[test]
fn test_negative_object_id_is_rejected() {
    let test_db = common::TestDb::new("test_negative_object_id_is_rejected.db");
    let repo = DieselRepository::new(test_db.pool());

    let tag = repo.create_tag(&NewTag::new("fresh")).unwrap();

    let err = repo
        .create_tagged_item(&NewTaggedItem::new(tag.id, "product", -1))
        .expect_err("negative keys are unsupported");
    assert!(matches!(err, RepositoryError::Validation(_)));
}

#[test]
fn test_tags_for_object() {
    let test_db = common::TestDb::new("test_tags_for_object.db");
    let repo = DieselRepository::new(test_db.pool());

    let product = seed_product(&repo, "Coffee");
    let fresh = repo.create_tag(&NewTag::new("fresh")).unwrap();
    let organic = repo.create_tag(&NewTag::new("organic")).unwrap();
    let unrelated = repo.create_tag(&NewTag::new("clearance")).unwrap();

    repo.create_tagged_item(&NewTaggedItem::new(fresh.id, "product", product.id))
        .unwrap();
    repo.create_tagged_item(&NewTaggedItem::new(organic.id, "product", product.id))
        .unwrap();
    repo.create_tagged_item(&NewTaggedItem::new(unrelated.id, "collection", 1))
        .unwrap();

    let tags = repo.tags_for("product", product.id).unwrap();
    let labels: Vec<&str> = tags.iter().map(|tag| tag.label.as_str()).collect();
    assert_eq!(labels, ["fresh", "organic"]);

    // The same object id under another kind is a different object.
    let collection_tags = repo.tags_for("collection", product.id).unwrap();
    assert_eq!(collection_tags.len(), 1);
    assert_eq!(collection_tags[0].label, "clearance");
}

#[test]
fn test_tag_listing_and_missing_item_resolution() {
    let test_db = common::TestDb::new("test_tag_listing_and_missing_item_resolution.db");
    let repo = DieselRepository::new(test_db.pool());
    let registry = TypeRegistry::with_default_kinds();

    repo.create_tag(&NewTag::new("  fresh  ")).unwrap();
    repo.create_tag(&NewTag::new("organic")).unwrap();

    let (total, tags) = repo.list_tags(TagListQuery::new().search("fre")).unwrap();
    assert_eq!(total, 1);
    assert_eq!(tags[0].label, "fresh"); // labels are trimmed on the way in

    // Resolving a tagged item that never existed is a caller error, not
    // a dangling reference.
    let err = repo
        .resolve_tagged_item(&registry, 999)
        .expect_err("missing tagged item");
    assert!(matches!(err, RepositoryError::NotFound));
}
