//! Fee setting and gateway payment flow.
//!
//! # Design
//! - Amounts are entered in whole rupees and sent to the gateway in paise.
//! - The client never judges a payment itself; only the backend's verify
//!   response moves the flow to [`PaymentFlow::Verified`].

use kodu_api_models::{CreateOrderRequest, PaymentOrder, SetFeeRequest, VerifyPaymentRequest};
use serde::{Deserialize, Serialize};

use crate::error::{FormError, FormResult, require};

/// Currency every order is raised in.
pub const CURRENCY: &str = "INR";
/// Alert shown when the fee form is incomplete.
pub const MISSING_FEE_INPUT: &str = "Please select a student and enter the fee amount";
/// Status text after a successful verification.
pub const VERIFIED_LABEL: &str = "Payment Verified";
/// Status text after any verification failure.
pub const VERIFICATION_FAILED_LABEL: &str = "Payment Verification Failed";

/// Student and amount as typed into a fee form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeForm {
    /// Selected student.
    pub student_id: String,
    /// Amount in rupees, as entered.
    pub amount: String,
}

impl FeeForm {
    /// Form with the given values.
    #[must_use]
    pub fn new(student_id: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            amount: amount.into(),
        }
    }

    /// Parse the amount as a positive whole number of rupees.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Required`] for blank inputs and
    /// [`FormError::Invalid`] for non-numeric or zero amounts.
    pub fn validate(&self) -> FormResult<u64> {
        require("studentId", &self.student_id)?;
        require("amount", &self.amount)?;
        match self.amount.trim().parse::<u64>() {
            Ok(0) => Err(FormError::Invalid {
                field: "amount".into(),
                reason: "must be greater than zero",
            }),
            Ok(rupees) => Ok(rupees),
            Err(_) => Err(FormError::Invalid {
                field: "amount".into(),
                reason: "must be a whole number of rupees",
            }),
        }
    }

    /// Validated amount converted to paise.
    ///
    /// # Errors
    ///
    /// Propagates [`FeeForm::validate`] failures and rejects amounts whose
    /// paise value overflows.
    pub fn amount_in_paise(&self) -> FormResult<u64> {
        self.validate()?
            .checked_mul(100)
            .ok_or_else(|| FormError::Invalid {
                field: "amount".into(),
                reason: "is too large",
            })
    }

    /// Body for `fees/set-fee`.
    ///
    /// # Errors
    ///
    /// Propagates validation failures.
    pub fn set_fee_request(&self) -> FormResult<SetFeeRequest> {
        Ok(SetFeeRequest {
            student_id: self.student_id.trim().to_string(),
            total_fee: self.validate()?,
        })
    }

    /// Body for `fees/create-payment-order`.
    ///
    /// # Errors
    ///
    /// Propagates validation failures.
    pub fn order_request(&self) -> FormResult<CreateOrderRequest> {
        Ok(CreateOrderRequest {
            amount: self.amount_in_paise()?,
            currency: CURRENCY.to_string(),
            student_id: self.student_id.trim().to_string(),
        })
    }

    /// Body for `fees/payment-success`.
    ///
    /// # Errors
    ///
    /// Propagates validation failures.
    pub fn verify_request(&self, receipt: &GatewayReceipt) -> FormResult<VerifyPaymentRequest> {
        Ok(VerifyPaymentRequest {
            payment_id: receipt.razorpay_payment_id.clone(),
            order_id: receipt.razorpay_order_id.clone(),
            student_id: self.student_id.trim().to_string(),
            total_fee: self.validate()?,
        })
    }
}

/// Identifiers the checkout overlay hands back on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayReceipt {
    /// Gateway payment id.
    pub razorpay_payment_id: String,
    /// Gateway order id.
    pub razorpay_order_id: String,
}

/// Overlay theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutTheme {
    /// Accent colour.
    pub color: String,
}

/// Options passed to the checkout overlay. The success handler is attached
/// by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutOptions {
    /// Publishable gateway key.
    pub key: String,
    /// Amount in paise, as returned by the order.
    pub amount: u64,
    /// Order currency.
    pub currency: String,
    /// Merchant label.
    pub name: String,
    /// Payment description.
    pub description: String,
    /// Gateway order id.
    pub order_id: String,
    /// Overlay theme.
    pub theme: CheckoutTheme,
}

impl CheckoutOptions {
    /// Options for paying `order` with the publishable `key`.
    #[must_use]
    pub fn for_order(key: &str, order: &PaymentOrder) -> Self {
        Self {
            key: key.to_string(),
            amount: order.amount,
            currency: order.currency.clone().unwrap_or_else(|| CURRENCY.to_string()),
            name: "Student Fee Payment".to_string(),
            description: "Fee payment for student".to_string(),
            order_id: order.order_id.clone(),
            theme: CheckoutTheme {
                color: "#F37254".to_string(),
            },
        }
    }
}

/// Where a fee payment stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PaymentFlow {
    /// No order raised yet.
    #[default]
    Idle,
    /// The backend raised a gateway order; the overlay may be open.
    OrderCreated(PaymentOrder),
    /// The backend confirmed the payment.
    Verified,
    /// Verification was refused or never completed.
    VerificationFailed(String),
}

impl PaymentFlow {
    /// Record a freshly created order.
    pub fn order_created(&mut self, order: PaymentOrder) {
        *self = Self::OrderCreated(order);
    }

    /// Record a 2xx verification response.
    pub fn verified(&mut self) {
        *self = Self::Verified;
    }

    /// Record a failed verification.
    pub fn verification_failed(&mut self, message: impl Into<String>) {
        *self = Self::VerificationFailed(message.into());
    }

    /// Pending order, while one is open.
    #[must_use]
    pub const fn order(&self) -> Option<&PaymentOrder> {
        match self {
            Self::OrderCreated(order) => Some(order),
            _ => None,
        }
    }

    /// Hosted payment page of the open order, when the gateway issued one.
    #[must_use]
    pub fn payment_link(&self) -> Option<&str> {
        self.order()
            .and_then(|order| order.short_url.as_deref())
            .filter(|url| !url.trim().is_empty())
    }

    /// QR code image of the open order, when the gateway issued one.
    #[must_use]
    pub fn qr_code(&self) -> Option<&str> {
        self.order()
            .and_then(|order| order.qr_code_url.as_deref())
            .filter(|url| !url.trim().is_empty())
    }

    /// Status line shown under the form.
    #[must_use]
    pub const fn status_label(&self) -> Option<&'static str> {
        match self {
            Self::Verified => Some(VERIFIED_LABEL),
            Self::VerificationFailed(_) => Some(VERIFICATION_FAILED_LABEL),
            Self::Idle | Self::OrderCreated(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kodu_test_support::fixtures::payment_order;

    #[test]
    fn amount_converts_to_paise() -> FormResult<()> {
        let form = FeeForm::new("s1", " 2500 ");
        assert_eq!(form.validate()?, 2500);
        assert_eq!(form.amount_in_paise()?, 250_000);
        let order = form.order_request()?;
        assert_eq!(order.currency, "INR");
        assert_eq!(order.amount, 250_000);
        assert_eq!(form.set_fee_request()?.total_fee, 2500);
        Ok(())
    }

    #[test]
    fn incomplete_or_bad_amounts_are_rejected() {
        assert!(matches!(
            FeeForm::new("", "100").validate(),
            Err(FormError::Required { .. })
        ));
        assert!(matches!(
            FeeForm::new("s1", "").validate(),
            Err(FormError::Required { .. })
        ));
        assert!(matches!(
            FeeForm::new("s1", "0").validate(),
            Err(FormError::Invalid { .. })
        ));
        assert!(matches!(
            FeeForm::new("s1", "12.5").validate(),
            Err(FormError::Invalid { .. })
        ));
        assert!(FeeForm::new("s1", &u64::MAX.to_string())
            .amount_in_paise()
            .is_err());
    }

    #[test]
    fn flow_labels_follow_verification() {
        let mut flow = PaymentFlow::default();
        assert_eq!(flow.status_label(), None);
        flow.order_created(payment_order("order_1", 250_000));
        assert_eq!(flow.order().map(|o| o.order_id.as_str()), Some("order_1"));
        assert_eq!(flow.status_label(), None);
        flow.verified();
        assert_eq!(flow.status_label(), Some("Payment Verified"));
        flow.verification_failed("signature mismatch");
        assert_eq!(flow.status_label(), Some("Payment Verification Failed"));
    }

    #[test]
    fn open_order_exposes_gateway_links() {
        let mut flow = PaymentFlow::default();
        let mut order = payment_order("order_2", 100);
        flow.order_created(order.clone());
        assert_eq!(flow.payment_link(), None);
        assert_eq!(flow.qr_code(), None);

        order.short_url = Some("https://rzp.io/i/abc".into());
        order.qr_code_url = Some(" ".into());
        flow.order_created(order);
        assert_eq!(flow.payment_link(), Some("https://rzp.io/i/abc"));
        assert_eq!(flow.qr_code(), None);

        flow.verified();
        assert_eq!(flow.payment_link(), None);
    }

    #[test]
    fn verify_request_uses_gateway_ids() -> FormResult<()> {
        let form = FeeForm::new("s1", "2500");
        let receipt = GatewayReceipt {
            razorpay_payment_id: "pay_9".into(),
            razorpay_order_id: "order_1".into(),
        };
        let request = form.verify_request(&receipt)?;
        assert_eq!(request.payment_id, "pay_9");
        assert_eq!(request.order_id, "order_1");
        assert_eq!(request.total_fee, 2500);
        Ok(())
    }

    #[test]
    fn checkout_options_copy_order() {
        let options = CheckoutOptions::for_order("rzp_test_key", &payment_order("order_1", 990));
        assert_eq!(options.amount, 990);
        assert_eq!(options.currency, "INR");
        assert_eq!(options.order_id, "order_1");
    }
}
