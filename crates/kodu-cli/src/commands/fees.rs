use kodu_api_models::{ApiMessage, PaymentOrder};
use kodu_core::endpoints;
use kodu_core::fees::{FeeForm, GatewayReceipt, PaymentFlow};
use reqwest::Method;

use crate::cli::{FeeArgs, OutputFormat, VerifyArgs};
use crate::client::{AppContext, CliError, CliResult, classify_problem, decode};
use crate::output::{render_message, render_payment_order};

fn form_from(args: &FeeArgs) -> FeeForm {
    FeeForm::new(args.student.as_str(), args.amount.as_str())
}

pub(crate) async fn handle_set(
    ctx: &AppContext,
    args: FeeArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let request = form_from(&args).set_fee_request()?;
    let session = ctx.session()?;
    let reply: Option<ApiMessage> = ctx
        .send_json(Method::POST, endpoints::SET_FEE, Some(&session), &request)
        .await?;
    render_message(
        &reply.unwrap_or_default().message_or("Fee successfully set"),
        format,
    )
}

pub(crate) async fn handle_order(
    ctx: &AppContext,
    args: FeeArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let request = form_from(&args).order_request()?;
    let session = ctx.session()?;
    let order: PaymentOrder = ctx
        .send_json(
            Method::POST,
            endpoints::CREATE_PAYMENT_ORDER,
            Some(&session),
            &request,
        )
        .await?;
    let mut flow = PaymentFlow::default();
    flow.order_created(order);
    tracing::info!(
        student_id = %request.student_id,
        amount_paise = request.amount,
        "payment order created"
    );
    match flow.order() {
        Some(order) => render_payment_order(order, format),
        None => Ok(()),
    }
}

pub(crate) async fn handle_verify(
    ctx: &AppContext,
    args: VerifyArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let receipt = GatewayReceipt {
        razorpay_payment_id: args.payment_id,
        razorpay_order_id: args.order_id,
    };
    let request = form_from(&args.fee).verify_request(&receipt)?;
    let session = ctx.session()?;

    let http = ctx
        .request(Method::POST, endpoints::PAYMENT_SUCCESS, Some(&session))?
        .json(&request);
    let mut flow = PaymentFlow::default();
    match ctx
        .fetch(http, &Method::POST, endpoints::PAYMENT_SUCCESS)
        .await?
    {
        Ok(response) => {
            let _: Option<ApiMessage> = decode(response, endpoints::PAYMENT_SUCCESS).await?;
            flow.verified();
        }
        Err(failure) => {
            let detail = failure.user_message("Payment verification failed");
            flow.verification_failed(detail.as_str());
            let label = flow.status_label().unwrap_or_default();
            return Err(match classify_problem(failure) {
                CliError::Validation(_) => CliError::validation(format!("{label}: {detail}")),
                CliError::Failure(err) => CliError::failure(err.context(label)),
            });
        }
    }
    render_message(flow.status_label().unwrap_or_default(), format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::logged_in;
    use anyhow::{Result, anyhow};
    use httpmock::prelude::*;
    use kodu_api_models::Role;
    use kodu_core::fees::VERIFICATION_FAILED_LABEL;
    use serde_json::json;

    fn err_text(err: &CliError) -> anyhow::Error {
        anyhow!(err.display_message())
    }

    fn fee(amount: &str) -> FeeArgs {
        FeeArgs {
            student: "s1".into(),
            amount: amount.into(),
        }
    }

    #[tokio::test]
    async fn set_fee_posts_rupees() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, bearer) = logged_in(&server, "c1", Role::Counsellor);
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/fees/set-fee")
                .header("authorization", bearer.as_str())
                .json_body(json!({ "studentId": "s1", "totalFee": 45000 }));
            then.status(200).json_body(json!({ "message": "Fee set" }));
        });
        handle_set(&ctx, fee("45000"), OutputFormat::Table)
            .await
            .map_err(|err| err_text(&err))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn order_posts_paise() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, _) = logged_in(&server, "c1", Role::Counsellor);
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/fees/create-payment-order")
                .json_body(json!({ "amount": 250_000, "currency": "INR", "studentId": "s1" }));
            then.status(200).json_body(json!({
                "order_id": "order_9", "amount": 250_000, "currency": "INR",
                "short_url": "https://rzp.io/i/abc"
            }));
        });
        handle_order(&ctx, fee("2500"), OutputFormat::Json)
            .await
            .map_err(|err| err_text(&err))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn zero_amount_never_reaches_server() {
        let server = MockServer::start_async().await;
        let (ctx, _) = logged_in(&server, "c1", Role::Counsellor);
        let err = handle_order(&ctx, fee("0"), OutputFormat::Table)
            .await
            .expect_err("zero amount");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn verify_posts_receipt() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, _) = logged_in(&server, "c1", Role::Counsellor);
        let mock = server.mock(|when, then| {
            when.method(POST).path("/fees/payment-success").json_body(json!({
                "paymentId": "pay_1", "orderId": "order_9", "studentId": "s1", "totalFee": 2500
            }));
            then.status(200).json_body(json!({ "message": "ok" }));
        });
        handle_verify(
            &ctx,
            VerifyArgs {
                fee: fee("2500"),
                order_id: "order_9".into(),
                payment_id: "pay_1".into(),
            },
            OutputFormat::Table,
        )
        .await
        .map_err(|err| err_text(&err))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn refused_verification_is_labelled() {
        let server = MockServer::start_async().await;
        let (ctx, _) = logged_in(&server, "c1", Role::Counsellor);
        server.mock(|when, then| {
            when.method(POST).path("/fees/payment-success");
            then.status(400).json_body(json!({ "message": "Signature mismatch" }));
        });
        let err = handle_verify(
            &ctx,
            VerifyArgs {
                fee: fee("2500"),
                order_id: "order_9".into(),
                payment_id: "pay_1".into(),
            },
            OutputFormat::Table,
        )
        .await
        .expect_err("refused");
        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            err.display_message(),
            format!("{VERIFICATION_FAILED_LABEL}: Signature mismatch")
        );
    }
}
