use storefront::domain::address::NewAddress;
use storefront::domain::cart::{NewCartItem, UpdateCartItem};
use storefront::domain::collection::{NewCollection, UpdateCollection};
use storefront::domain::customer::{CustomerListQuery, Membership, NewCustomer, UpdateCustomer};
use storefront::domain::order::{NewOrder, NewOrderItem, PaymentStatus, UpdateOrder};
use storefront::domain::product::{NewProduct, ProductListQuery, UpdateProduct};
use storefront::domain::promotion::NewPromotion;
use storefront::repository::errors::RepositoryError;
use storefront::repository::{
    AddressReader, AddressWriter, CartReader, CartWriter, CollectionReader, CollectionWriter,
    CustomerReader, CustomerWriter, DieselRepository, OrderReader, OrderWriter, ProductReader,
    ProductWriter, PromotionWriter,
};

mod common;

fn seed_collection(repo: &DieselRepository, title: &str) -> storefront::domain::collection::Collection {
    repo.create_collection(&NewCollection::new(title))
        .expect("create collection")
}

fn seed_product(
    repo: &DieselRepository,
    collection_id: i32,
    title: &str,
    price_cents: i32,
) -> storefront::domain::product::Product {
    repo.create_product(&NewProduct::new(title, price_cents, collection_id))
        .expect("create product")
}

fn seed_customer(repo: &DieselRepository, email: &str) -> storefront::domain::customer::Customer {
    repo.create_customer(&NewCustomer::new("Jane", "Doe", email, "5551234567"))
        .expect("create customer")
}

#[test]
fn test_customer_phone_validation() {
    let test_db = common::TestDb::new("test_customer_phone_validation.db");
    let repo = DieselRepository::new(test_db.pool());

    let too_short = NewCustomer::new("Jane", "Doe", "jane@example.com", "12345");
    assert!(matches!(
        repo.create_customer(&too_short),
        Err(RepositoryError::Validation(_))
    ));

    let too_long = NewCustomer::new("Jane", "Doe", "jane@example.com", "12345678901");
    assert!(matches!(
        repo.create_customer(&too_long),
        Err(RepositoryError::Validation(_))
    ));

    let valid = NewCustomer::new("Jane", "Doe", "jane@example.com", "1234567890");
    let customer = repo.create_customer(&valid).expect("valid phone accepted");
    assert_eq!(customer.phone, "1234567890");
    assert_eq!(customer.membership, Membership::Bronze);
}

#[test]
fn test_customer_email_unique() {
    let test_db = common::TestDb::new("test_customer_email_unique.db");
    let repo = DieselRepository::new(test_db.pool());

    seed_customer(&repo, "dup@example.com");

    let duplicate = NewCustomer::new("John", "Smith", "Dup@Example.com", "5557654321");
    let err = repo
        .create_customer(&duplicate)
        .expect_err("duplicate email must be rejected");
    assert!(matches!(err, RepositoryError::UniqueViolation(_)));
}

#[test]
fn test_customer_lookup_and_ordering() {
    let test_db = common::TestDb::new("test_customer_lookup_and_ordering.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_customer(&NewCustomer::new("Zoe", "Young", "zoe@example.com", "5550000001"))
        .unwrap();
    repo.create_customer(&NewCustomer::new("Adam", "Young", "adam@example.com", "5550000002"))
        .unwrap();
    repo.create_customer(
        &NewCustomer::new("Bea", "Archer", "bea@example.com", "5550000003")
            .with_membership(Membership::Gold),
    )
    .unwrap();

    let (total, customers) = repo.list_customers(CustomerListQuery::new()).unwrap();
    assert_eq!(total, 3);
    // Sorted by last name, then first name.
    assert_eq!(customers[0].email, "bea@example.com");
    assert_eq!(customers[1].email, "adam@example.com");
    assert_eq!(customers[2].email, "zoe@example.com");

    let (gold_total, gold) = repo
        .list_customers(CustomerListQuery::new().membership(Membership::Gold))
        .unwrap();
    assert_eq!(gold_total, 1);
    assert_eq!(gold[0].last_name, "Archer");

    // Lookup normalises case the same way create does.
    let by_email = repo
        .get_customer_by_email("BEA@example.com")
        .unwrap()
        .expect("customer found by email");
    assert_eq!(by_email.first_name, "Bea");
}

#[test]
fn test_customer_update_and_delete_policies() {
    let test_db = common::TestDb::new("test_customer_update_and_delete_policies.db");
    let repo = DieselRepository::new(test_db.pool());

    let customer = seed_customer(&repo, "jane@example.com");
    repo.create_address(&NewAddress::new(customer.id, "1 Main St", "Springfield").with_zip("12345"))
        .unwrap();
    repo.create_address(&NewAddress::new(customer.id, "2 Side St", "Springfield"))
        .unwrap();

    let updated = repo
        .update_customer(
            customer.id,
            &UpdateCustomer::new("Jane", "Doe", "jane@example.com", "5559999999")
                .with_membership(Membership::Silver),
        )
        .unwrap();
    assert_eq!(updated.phone, "5559999999");
    assert_eq!(updated.membership, Membership::Silver);

    // A customer with orders cannot be deleted.
    let order = repo.create_order(&NewOrder::new(customer.id)).unwrap();
    let err = repo
        .delete_customer(customer.id)
        .expect_err("customer with orders is protected");
    assert!(matches!(err, RepositoryError::ReferentialIntegrity(_)));

    // Without orders the delete succeeds and takes the addresses along.
    repo.delete_order(order.id).unwrap();
    repo.delete_customer(customer.id).unwrap();
    assert!(repo.get_customer_by_id(customer.id).unwrap().is_none());
    assert!(repo.list_addresses(customer.id).unwrap().is_empty());
}

#[test]
fn test_collection_delete_policies() {
    let test_db = common::TestDb::new("test_collection_delete_policies.db");
    let repo = DieselRepository::new(test_db.pool());

    let collection = seed_collection(&repo, "Beverages");
    let product = seed_product(&repo, collection.id, "Coffee", 1250);

    // A collection with products is protected.
    let err = repo
        .delete_collection(collection.id)
        .expect_err("collection with products is protected");
    assert!(matches!(err, RepositoryError::ReferentialIntegrity(_)));

    // A deleted featured product clears the reference instead.
    let featured = repo
        .update_collection(
            collection.id,
            &UpdateCollection::new("Beverages").with_featured_product(product.id),
        )
        .unwrap();
    assert_eq!(featured.featured_product_id, Some(product.id));

    repo.delete_product(product.id).unwrap();

    let reloaded = repo
        .get_collection_by_id(collection.id)
        .unwrap()
        .expect("collection still present");
    assert_eq!(reloaded.featured_product_id, None);

    // With no products left the collection can go too.
    repo.delete_collection(collection.id).unwrap();
    assert!(repo.get_collection_by_id(collection.id).unwrap().is_none());
}

#[test]
fn test_product_listing_and_promotions() {
    let test_db = common::TestDb::new("test_product_listing_and_promotions.db");
    let repo = DieselRepository::new(test_db.pool());

    let collection = seed_collection(&repo, "Pantry");
    let other = seed_collection(&repo, "Cleaning");

    repo.create_product(
        &NewProduct::new("Olive Oil", 899, collection.id)
            .with_slug("olive-oil")
            .with_description("Extra virgin")
            .with_inventory(40),
    )
    .unwrap();
    let pasta = repo
        .create_product(&NewProduct::new("Pasta", 299, collection.id).with_slug("pasta"))
        .unwrap();
    repo.create_product(&NewProduct::new("Sponge", 199, other.id))
        .unwrap();

    let (total, all) = repo.list_products(ProductListQuery::new()).unwrap();
    assert_eq!(total, 3);
    assert_eq!(all.len(), 3);

    let (pantry_total, pantry) = repo
        .list_products(ProductListQuery::new().collection(collection.id))
        .unwrap();
    assert_eq!(pantry_total, 2);
    assert!(pantry.iter().all(|p| p.collection_id == collection.id));

    let (_, by_slug) = repo
        .list_products(ProductListQuery::new().slug("pasta"))
        .unwrap();
    assert_eq!(by_slug.len(), 1);
    assert_eq!(by_slug[0].id, pasta.id);

    let summer = repo
        .create_promotion(&NewPromotion::new("Summer sale", 0.15))
        .unwrap();
    let clearance = repo
        .create_promotion(&NewPromotion::new("Clearance", 0.4))
        .unwrap();

    let linked = repo
        .set_product_promotions(pasta.id, &[summer.id, clearance.id])
        .unwrap();
    assert_eq!(linked.promotions.len(), 2);

    let relinked = repo.set_product_promotions(pasta.id, &[summer.id]).unwrap();
    assert_eq!(relinked.promotions.len(), 1);
    assert_eq!(relinked.promotions[0].id, summer.id);

    // Deleting a promotion cascades the join rows.
    repo.delete_promotion(summer.id).unwrap();
    let reloaded = repo.get_product_by_id(pasta.id).unwrap().unwrap();
    assert!(reloaded.promotions.is_empty());
}

#[test]
fn test_product_validation_bounds() {
    let test_db = common::TestDb::new("test_product_validation_bounds.db");
    let repo = DieselRepository::new(test_db.pool());

    let collection = seed_collection(&repo, "Pantry");

    let too_expensive = NewProduct::new("Gold Bar", 1_000_000, collection.id);
    assert!(matches!(
        repo.create_product(&too_expensive),
        Err(RepositoryError::Validation(_))
    ));

    let discount_too_big = NewPromotion::new("Everything free and more", 1.5);
    assert!(matches!(
        repo.create_promotion(&discount_too_big),
        Err(RepositoryError::Validation(_))
    ));
}

#[test]
fn test_order_snapshot_and_delete_policies() {
    let test_db = common::TestDb::new("test_order_snapshot_and_delete_policies.db");
    let repo = DieselRepository::new(test_db.pool());

    let collection = seed_collection(&repo, "Pantry");
    let product = seed_product(&repo, collection.id, "Coffee", 500);
    let customer = seed_customer(&repo, "jane@example.com");

    let order = repo
        .create_order(
            &NewOrder::new(customer.id)
                .with_status(PaymentStatus::Pending)
                .with_item(NewOrderItem::priced_from(&product, 2)),
        )
        .unwrap();
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].unit_price_cents, 500);
    assert_eq!(order.payment_status, PaymentStatus::Pending);

    // The line keeps the price captured at order time.
    repo.update_product(
        product.id,
        &UpdateProduct::new("Coffee", 700, collection.id),
    )
    .unwrap();
    let reloaded = repo.get_order_by_id(order.id).unwrap().unwrap();
    assert_eq!(reloaded.items[0].unit_price_cents, 500);

    // A product on an order cannot be deleted.
    let err = repo
        .delete_product(product.id)
        .expect_err("ordered product is protected");
    assert!(matches!(err, RepositoryError::ReferentialIntegrity(_)));

    // Nor can the order itself while it still has lines.
    let err = repo
        .delete_order(order.id)
        .expect_err("order with lines is protected");
    assert!(matches!(err, RepositoryError::ReferentialIntegrity(_)));

    // Clearing the lines unblocks the delete.
    repo.update_order(order.id, &UpdateOrder::new().items(Vec::new()))
        .unwrap();
    repo.delete_order(order.id).unwrap();
    assert!(repo.get_order_by_id(order.id).unwrap().is_none());
}

#[test]
fn test_order_rejects_invalid_quantity() {
    let test_db = common::TestDb::new("test_order_rejects_invalid_quantity.db");
    let repo = DieselRepository::new(test_db.pool());

    let collection = seed_collection(&repo, "Pantry");
    let product = seed_product(&repo, collection.id, "Coffee", 500);
    let customer = seed_customer(&repo, "jane@example.com");

    let zero_quantity = NewOrder::new(customer.id).with_item(NewOrderItem::new(product.id, 0, 500));
    assert!(matches!(
        repo.create_order(&zero_quantity),
        Err(RepositoryError::Validation(_))
    ));
}

#[test]
fn test_placed_at_is_store_stamped_and_immutable() {
    let test_db = common::TestDb::new("test_placed_at_is_store_stamped_and_immutable.db");
    let repo = DieselRepository::new(test_db.pool());

    let customer = seed_customer(&repo, "jane@example.com");
    let order = repo.create_order(&NewOrder::new(customer.id)).unwrap();
    assert_eq!(order.payment_status, PaymentStatus::Pending);

    let updated = repo
        .update_order(
            order.id,
            &UpdateOrder::new().payment_status(PaymentStatus::Complete),
        )
        .unwrap();

    assert_eq!(updated.payment_status, PaymentStatus::Complete);
    assert_eq!(updated.placed_at, order.placed_at);
}

#[test]
fn test_last_update_is_store_maintained() {
    let test_db = common::TestDb::new("test_last_update_is_store_maintained.db");
    let repo = DieselRepository::new(test_db.pool());

    let collection = seed_collection(&repo, "Pantry");
    let product = seed_product(&repo, collection.id, "Coffee", 500);

    let updated = repo
        .update_product(
            product.id,
            &UpdateProduct::new("Espresso", 600, collection.id),
        )
        .unwrap();

    assert_eq!(updated.title, "Espresso");
    // The trigger restamps the row; the payload carries no timestamp.
    assert!(updated.last_update >= product.last_update);
}

#[test]
fn test_cart_cascades() {
    let test_db = common::TestDb::new("test_cart_cascades.db");
    let repo = DieselRepository::new(test_db.pool());

    let collection = seed_collection(&repo, "Pantry");
    let coffee = seed_product(&repo, collection.id, "Coffee", 500);
    let tea = seed_product(&repo, collection.id, "Tea", 300);

    let cart = repo.create_cart().unwrap();
    assert!(cart.items.is_empty());

    let coffee_line = repo
        .add_cart_item(&NewCartItem::new(cart.id, coffee.id, 1))
        .unwrap();
    repo.add_cart_item(&NewCartItem::new(cart.id, tea.id, 2))
        .unwrap();

    let coffee_line = repo
        .update_cart_item(coffee_line.id, &UpdateCartItem::new(3))
        .unwrap();
    assert_eq!(coffee_line.quantity, 3);

    assert!(matches!(
        repo.add_cart_item(&NewCartItem::new(cart.id, tea.id, 0)),
        Err(RepositoryError::Validation(_))
    ));

    // Deleting a product in a cart silently drops its line.
    repo.delete_product(coffee.id).unwrap();
    let cart = repo.get_cart_by_id(cart.id).unwrap().unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].product_id, tea.id);

    // Deleting the cart drops the remaining lines.
    repo.delete_cart(cart.id).unwrap();
    assert!(repo.get_cart_by_id(cart.id).unwrap().is_none());
    let survivor = repo.get_product_by_id(tea.id).unwrap();
    assert!(survivor.is_some(), "cascade must not touch the product");
}
