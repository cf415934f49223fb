//! Integration test for fixture-backed checkout pricing.
//!
//! Walks the clothing catalog through cart, discount, delivery fee and tax
//! stages and checks the minor unit arithmetic at each step.
//!
//! Discounted checkout with a delivery fee:
//!
//! - Graphic Tee Shirt x2: Rs 145.00 each -> Rs 290.00 (29000 paise)
//! - Slim Fit Jeans x1: Rs 180.00 (18000 paise)
//! - Subtotal: Rs 470.00 (47000 paise)
//! - Loyalty discount 20%: -Rs 94.00 (9400 paise)
//! - Delivery fee: Rs 15.00 (1500 paise)
//! - No tax
//! - Total: Rs 391.00 (39100 paise)
//!
//! Taxed checkout without a discount:
//!
//! - Cotton Kurta x1: Rs 240.00 (24000 paise)
//! - Delivery fee: Rs 15.00 (1500 paise)
//! - Tax at 13% of the undiscounted subtotal: Rs 31.20 (3120 paise)
//! - Total: Rs 286.20 (28620 paise)

use rust_decimal::Decimal;
use rusty_money::Money;
use testresult::TestResult;

use till::{
    cart::{Cart, CartError},
    discounts::DiscountPercent,
    draft::{AppliedLoyalty, OrderDraft, PaymentMethod},
    fixtures::Catalog,
    pricing::{DeliveryFee, PriceBreakdown},
    tax::TaxRate,
    variants::{Barcode, VariantId},
};

const TEE_SHIRT: &str = "8901000000011";
const JEANS: &str = "8901000000028";
const KURTA: &str = "8901000000035";

#[test]
fn test_discounted_checkout_with_delivery_fee() -> TestResult {
    let catalog = Catalog::from_set("clothing")?;
    let currency = catalog.currency();

    // Scan two tee shirts and a pair of jeans
    let mut cart = Cart::new(currency);
    cart.add(catalog.variant_by_barcode(&Barcode::new(TEE_SHIRT))?, 2)?;
    cart.add(catalog.variant_by_barcode(&Barcode::new(JEANS))?, 1)?;

    let breakdown = PriceBreakdown::compute(
        &cart,
        DiscountPercent::new(Decimal::from(20))?,
        DeliveryFee::new(Money::from_minor(1500, currency))?,
        TaxRate::zero(),
    )?;

    assert_eq!(breakdown.subtotal(), Money::from_minor(47000, currency));
    assert_eq!(
        breakdown.discount_amount(),
        Money::from_minor(9400, currency)
    );
    assert_eq!(breakdown.tax_amount(), Money::from_minor(0, currency));
    assert_eq!(breakdown.total(), Money::from_minor(39100, currency));

    Ok(())
}

#[test]
fn test_taxed_checkout_without_discount() -> TestResult {
    let catalog = Catalog::from_set("clothing")?;
    let currency = catalog.currency();

    let mut cart = Cart::new(currency);
    cart.add(catalog.variant_by_barcode(&Barcode::new(KURTA))?, 1)?;

    let breakdown = PriceBreakdown::compute(
        &cart,
        DiscountPercent::zero(),
        DeliveryFee::new(Money::from_minor(1500, currency))?,
        TaxRate::new(Decimal::from(13))?,
    )?;

    assert_eq!(breakdown.subtotal(), Money::from_minor(24000, currency));
    assert_eq!(breakdown.discount_amount(), Money::from_minor(0, currency));
    assert_eq!(breakdown.tax_amount(), Money::from_minor(3120, currency));
    assert_eq!(breakdown.total(), Money::from_minor(28620, currency));

    Ok(())
}

#[test]
fn test_tax_ignores_the_discount() -> TestResult {
    let catalog = Catalog::from_set("clothing")?;
    let currency = catalog.currency();

    let mut cart = Cart::new(currency);
    cart.add(catalog.variant_by_barcode(&Barcode::new(KURTA))?, 1)?;

    // 24000 - 4800 + 0 + 3120: the 13% applies to the full 24000
    let breakdown = PriceBreakdown::compute(
        &cart,
        DiscountPercent::new(Decimal::from(20))?,
        DeliveryFee::free(currency),
        TaxRate::new(Decimal::from(13))?,
    )?;

    assert_eq!(breakdown.tax_amount(), Money::from_minor(3120, currency));
    assert_eq!(breakdown.total(), Money::from_minor(22320, currency));

    Ok(())
}

#[test]
fn test_stock_cap_rejects_and_preserves_quantity() -> TestResult {
    let catalog = Catalog::from_set("clothing")?;
    let tee_shirt = catalog.variant_by_barcode(&Barcode::new(TEE_SHIRT))?;

    let mut cart = Cart::new(catalog.currency());
    cart.add(tee_shirt, 3)?;

    // The tee shirt only has 10 in stock
    let result = cart.set_quantity(tee_shirt.id(), 99);

    assert_eq!(
        result,
        Err(CartError::StockExceeded {
            variant: tee_shirt.id().clone(),
            limit: 10,
        })
    );

    let line = cart.line(tee_shirt.id()).ok_or("line should exist")?;

    assert_eq!(line.quantity(), 3, "rejected update must not change the line");

    Ok(())
}

#[test]
fn test_empty_cart_total_is_the_delivery_fee() -> TestResult {
    let catalog = Catalog::from_set("clothing")?;
    let currency = catalog.currency();

    let cart = Cart::new(currency);

    let breakdown = PriceBreakdown::compute(
        &cart,
        DiscountPercent::new(Decimal::from(20))?,
        DeliveryFee::new(Money::from_minor(1500, currency))?,
        TaxRate::new(Decimal::from(13))?,
    )?;

    assert_eq!(breakdown.subtotal(), Money::from_minor(0, currency));
    assert_eq!(breakdown.total(), Money::from_minor(1500, currency));

    Ok(())
}

#[test]
fn test_totals_do_not_depend_on_scan_order() -> TestResult {
    let catalog = Catalog::from_set("clothing")?;
    let currency = catalog.currency();
    let tee_shirt = catalog.variant_by_barcode(&Barcode::new(TEE_SHIRT))?;
    let jeans = catalog.variant_by_barcode(&Barcode::new(JEANS))?;

    let mut forwards = Cart::new(currency);
    forwards.add(tee_shirt, 2)?;
    forwards.add(jeans, 1)?;

    let mut backwards = Cart::new(currency);
    backwards.add(jeans, 1)?;
    backwards.add(tee_shirt, 2)?;

    let discount = DiscountPercent::new(Decimal::from(20))?;
    let fee = DeliveryFee::new(Money::from_minor(1500, currency))?;
    let tax = TaxRate::new(Decimal::from(13))?;

    let first = PriceBreakdown::compute(&forwards, discount, fee, tax)?;
    let second = PriceBreakdown::compute(&backwards, discount, fee, tax)?;

    assert_eq!(first.total(), second.total());

    Ok(())
}

#[test]
fn test_draft_loyalty_discount_flows_into_the_breakdown() -> TestResult {
    let catalog = Catalog::from_set("clothing")?;
    let currency = catalog.currency();

    let mut draft = OrderDraft::new(currency);
    draft
        .cart_mut()
        .add(catalog.variant_by_barcode(&Barcode::new(TEE_SHIRT))?, 2)?;
    draft
        .cart_mut()
        .add(catalog.variant_by_barcode(&Barcode::new(JEANS))?, 1)?;
    draft.apply_loyalty(AppliedLoyalty::new(
        Barcode::new("LOYAL-001"),
        DiscountPercent::new(Decimal::from(20))?,
    ));
    draft.set_payment_method(PaymentMethod::Upi);

    let validated = draft.validate()?;
    assert_eq!(validated.payment_method(), PaymentMethod::Upi);

    let breakdown = PriceBreakdown::compute(
        draft.cart(),
        draft.discount_percent(),
        DeliveryFee::new(Money::from_minor(1500, currency))?,
        TaxRate::zero(),
    )?;

    assert_eq!(breakdown.total(), Money::from_minor(39100, currency));

    Ok(())
}

#[test]
fn test_repricing_the_same_cart_is_stable() -> TestResult {
    let catalog = Catalog::from_set("clothing")?;
    let currency = catalog.currency();

    let mut cart = Cart::new(currency);
    cart.add(catalog.variant_by_barcode(&Barcode::new(TEE_SHIRT))?, 2)?;
    cart.add(catalog.variant_by_barcode(&Barcode::new(JEANS))?, 1)?;

    let discount = DiscountPercent::new(Decimal::from(20))?;
    let fee = DeliveryFee::new(Money::from_minor(1500, currency))?;
    let tax = TaxRate::new(Decimal::from(13))?;

    let first = PriceBreakdown::compute(&cart, discount, fee, tax)?;
    let second = PriceBreakdown::compute(&cart, discount, fee, tax)?;

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_removing_a_line_reprices_the_cart() -> TestResult {
    let catalog = Catalog::from_set("clothing")?;
    let currency = catalog.currency();

    let mut cart = Cart::new(currency);
    cart.add(catalog.variant_by_barcode(&Barcode::new(TEE_SHIRT))?, 2)?;
    cart.add(catalog.variant_by_barcode(&Barcode::new(JEANS))?, 1)?;

    cart.remove(&VariantId::new("VAR-JEANS"));

    assert_eq!(cart.subtotal()?, Money::from_minor(29000, currency));

    Ok(())
}
