use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::{bookingdb::BookingExt, paymentdb::PaymentExt},
    dtos::{paymentdtos::*, userdtos::RequestQueryDto},
    error::HttpError,
    middleware::main_middleware::JWTAuthMiddeware,
    models::{
        bookingmodel::BookingPaymentStatus,
        paymentmodel::{Payment, PaymentProvider, PaymentStatus},
    },
    service::payment_provider::{PaymentProviderService, ProviderVerification},
    utils::currency::parse_amount_to_kobo,
    AppState,
};

pub fn payments_handler() -> Router {
    Router::new()
        .route("/stripe/create-intent", post(stripe_intent))
        .route("/paystack/initialize", post(paystack_initialize))
        .route("/paystack/verify/:reference", get(paystack_verify))
        .route("/flutterwave/initialize", post(flutterwave_initialize))
        .route("/flutterwave/verify/:reference", get(flutterwave_verify))
        .route("/history", get(payment_history))
}

pub async fn stripe_intent(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<StripeIntentDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let amount_kobo = parse_amount_to_kobo(body.amount);
    let currency = body.currency.unwrap_or_else(|| "NGN".to_string());
    let reference = PaymentProviderService::generate_reference("str");

    let intent = app_state
        .payment_provider
        .stripe_create_intent(amount_kobo, &currency, &reference)
        .await?;

    app_state
        .db_client
        .save_payment(
            user.user.id,
            body.booking_id,
            amount_kobo,
            &currency,
            PaymentProvider::Stripe,
            &reference,
            None,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(StripeIntentResponseDto {
        status: "success".to_string(),
        client_secret: intent.client_secret,
        reference,
    }))
}

pub async fn paystack_initialize(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<PaystackInitDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let amount_kobo = parse_amount_to_kobo(body.amount);
    let reference = PaymentProviderService::generate_reference("ps");

    let metadata = body
        .booking_id
        .map(|id| serde_json::json!({ "booking_id": id }));

    let init = app_state
        .payment_provider
        .paystack_initialize(&user.user.email, amount_kobo, &reference, metadata.clone())
        .await?;

    app_state
        .db_client
        .save_payment(
            user.user.id,
            body.booking_id,
            amount_kobo,
            "NGN",
            PaymentProvider::Paystack,
            &reference,
            metadata,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(PaystackInitResponseDto {
        status: "success".to_string(),
        authorization_url: init.authorization_url,
        access_code: init.access_code,
        reference,
    }))
}

pub async fn paystack_verify(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(reference): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let verification = app_state.payment_provider.paystack_verify(&reference).await?;

    let payment = settle_payment(&app_state, &user, &reference, verification).await?;

    Ok(Json(PaymentVerifyResponseDto {
        status: "success".to_string(),
        payment,
    }))
}

pub async fn flutterwave_initialize(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<FlutterwaveInitDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let amount_kobo = parse_amount_to_kobo(body.amount);
    let reference = PaymentProviderService::generate_reference("tx");

    let metadata = body
        .booking_id
        .map(|id| serde_json::json!({ "booking_id": id }));

    let init = app_state
        .payment_provider
        .flutterwave_initialize(&user.user.email, amount_kobo, &reference, metadata.clone())
        .await?;

    app_state
        .db_client
        .save_payment(
            user.user.id,
            body.booking_id,
            amount_kobo,
            "NGN",
            PaymentProvider::Flutterwave,
            &reference,
            metadata,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(FlutterwaveInitResponseDto {
        status: "success".to_string(),
        payment_link: init.payment_link,
        reference,
    }))
}

pub async fn flutterwave_verify(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(reference): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let verification = app_state
        .payment_provider
        .flutterwave_verify(&reference)
        .await?;

    let payment = settle_payment(&app_state, &user, &reference, verification).await?;

    Ok(Json(PaymentVerifyResponseDto {
        status: "success".to_string(),
        payment,
    }))
}

pub async fn payment_history(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Query(query): Query<RequestQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);

    let payments = app_state
        .db_client
        .get_user_payments(user.user.id, page as u32, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total = app_state
        .db_client
        .get_user_payment_count(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(PaymentHistoryResponseDto {
        status: "success".to_string(),
        payments,
        total,
        page,
        limit,
    }))
}

/// Reconciles a gateway verification result with our payment record, and
/// marks the linked booking paid when the amounts line up.
///
/// Verification is still client-triggered here: the frontend calls these
/// verify routes after redirect. Gateway webhooks would be the stronger
/// source of truth and should eventually replace this path.
async fn settle_payment(
    app_state: &AppState,
    user: &JWTAuthMiddeware,
    reference: &str,
    verification: ProviderVerification,
) -> Result<Payment, HttpError> {
    let payment = app_state
        .db_client
        .get_payment_by_reference(reference)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Payment not found".to_string()))?;

    if payment.user_id != user.user.id {
        return Err(HttpError::unauthorized(
            "Payment does not belong to this account".to_string(),
        ));
    }

    if payment.status != PaymentStatus::Pending {
        return Ok(payment);
    }

    let successful = verification.successful && verification.amount >= payment.amount;

    let new_status = if successful {
        PaymentStatus::Success
    } else {
        PaymentStatus::Failed
    };

    let payment = app_state
        .db_client
        .update_payment_status(payment.id, new_status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if successful {
        if let Some(booking_id) = payment.booking_id {
            let booking = app_state
                .db_client
                .set_booking_payment_status(booking_id, BookingPaymentStatus::Paid)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?;

            if let Some(escort_id) = booking.escort_id {
                app_state
                    .db_client
                    .set_escort_payment_status(escort_id, BookingPaymentStatus::Paid)
                    .await
                    .map_err(|e| HttpError::server_error(e.to_string()))?;
            }
        }
    } else {
        return Err(HttpError::payment_required(format!(
            "Payment {} was not successful",
            reference
        )));
    }

    Ok(payment)
}
