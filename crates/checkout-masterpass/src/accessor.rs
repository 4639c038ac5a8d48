//! # Checkout Data Accessors
//!
//! Lazy lookups over the snapshot a button captured at initialize time.
//! They run when the client is loaded and again when the button is
//! clicked, always against that same snapshot.

use checkout_core::{
    Checkout, CheckoutError, CheckoutResult, CheckoutSnapshot, MissingDataKind, PaymentMethod,
};

/// Resolve the Masterpass payment method from a loaded snapshot.
///
/// A method without a Masterpass `checkoutId` counts as missing: it exists
/// but cannot start a wallet checkout.
pub fn masterpass_payment_method<'a>(
    method_id: Option<&str>,
    snapshot: Option<&'a CheckoutSnapshot>,
) -> CheckoutResult<&'a PaymentMethod> {
    let method_id = method_id.ok_or_else(CheckoutError::invalid_arguments)?;
    let snapshot = snapshot.ok_or(CheckoutError::MissingData(MissingDataKind::MissingCheckout))?;

    snapshot
        .get_payment_method(method_id)
        .filter(|method| method.initialization_data.checkout_id().is_some())
        .ok_or(CheckoutError::MissingData(MissingDataKind::MissingPaymentMethod))
}

/// The checkout from a loaded snapshot; it must carry a cart.
pub fn checkout_with_cart(snapshot: Option<&CheckoutSnapshot>) -> CheckoutResult<&Checkout> {
    snapshot
        .and_then(CheckoutSnapshot::get_checkout)
        .filter(|checkout| !checkout.cart.id.is_empty())
        .ok_or(CheckoutError::MissingData(MissingDataKind::MissingCheckout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{Cart, Currency};

    fn snapshot_with(method: PaymentMethod) -> CheckoutSnapshot {
        CheckoutSnapshot::default().with_payment_method(method)
    }

    #[test]
    fn test_missing_method_id() {
        let snapshot = CheckoutSnapshot::default();
        let err = masterpass_payment_method(None, Some(&snapshot)).unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidArgument(_)));
    }

    #[test]
    fn test_missing_snapshot() {
        let err = masterpass_payment_method(Some("masterpass"), None).unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::MissingData(MissingDataKind::MissingCheckout)
        ));
    }

    #[test]
    fn test_unknown_method() {
        let snapshot = snapshot_with(PaymentMethod::new("paypal").with_checkout_id("c1", vec![]));
        let err = masterpass_payment_method(Some("masterpass"), Some(&snapshot)).unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::MissingData(MissingDataKind::MissingPaymentMethod)
        ));
    }

    #[test]
    fn test_method_without_checkout_id() {
        let snapshot = snapshot_with(PaymentMethod::new("masterpass").with_checkout_id("", vec![]));
        let err = masterpass_payment_method(Some("masterpass"), Some(&snapshot)).unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::MissingData(MissingDataKind::MissingPaymentMethod)
        ));

        let snapshot = snapshot_with(PaymentMethod::new("masterpass"));
        assert!(masterpass_payment_method(Some("masterpass"), Some(&snapshot)).is_err());
    }

    #[test]
    fn test_resolves_configured_method() {
        let snapshot = snapshot_with(
            PaymentMethod::new("masterpass")
                .with_checkout_id("c1", vec!["visa".into()])
                .with_test_mode(true),
        );

        let method = masterpass_payment_method(Some("masterpass"), Some(&snapshot)).unwrap();
        assert_eq!(method.id, "masterpass");
        assert!(method.config.test_mode);
    }

    #[test]
    fn test_checkout_requires_cart_id() {
        assert!(checkout_with_cart(None).is_err());
        assert!(checkout_with_cart(Some(&CheckoutSnapshot::default())).is_err());

        let snapshot = CheckoutSnapshot::default()
            .with_checkout(Checkout::new("chk1", Cart::new("", 1.0, Currency::new("USD"))));
        let err = checkout_with_cart(Some(&snapshot)).unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::MissingData(MissingDataKind::MissingCheckout)
        ));

        let snapshot = CheckoutSnapshot::default()
            .with_checkout(Checkout::new("chk1", Cart::new("cart1", 1.0, Currency::new("USD"))));
        assert_eq!(checkout_with_cart(Some(&snapshot)).unwrap().cart.id, "cart1");
    }
}
