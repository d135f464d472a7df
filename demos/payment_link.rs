//! Example: create a payment link and print its checkout URL
//!
//! Run with `UPAY_API_KEY=... cargo run --example payment_link`.

use upay::{
    CreatePaymentLinkRequest, ListPaymentLinksParams, PaginationParams, PaymentLinkSettings,
    UpayClient, ValidateCouponRequest,
};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let client = UpayClient::from_env()?;
    let links = client.payment_links();

    println!("Creating payment link...");
    let request = CreatePaymentLinkRequest::with_amount("Premium plan", 9_990)
        .description("Annual access to all courses")
        .settings(PaymentLinkSettings {
            pix_enabled: Some(true),
            credit_card_enabled: Some(true),
            max_installments: Some(12),
            ..Default::default()
        });
    let link = links.create(&request).await?;

    println!("Created {} ({})", link.title, link.id);
    if let Some(amount) = link.amount_decimal() {
        println!("  Amount: R$ {}", amount);
    }
    println!("  Checkout: {}", links.checkout_url(&link.slug)?);

    let coupon = client
        .coupons()
        .validate(&ValidateCouponRequest::new("WELCOME10", 9_990))
        .await?;
    if coupon.valid {
        println!(
            "Coupon WELCOME10 brings the price to {} cents",
            coupon.final_amount_cents
        );
    } else {
        println!(
            "Coupon WELCOME10 rejected: {}",
            coupon.message.unwrap_or_default()
        );
    }

    let params = ListPaymentLinksParams {
        pagination: PaginationParams::new().with_limit(5),
        ..Default::default()
    };
    let page = links.list(&params).await?;
    println!("\nLatest payment links ({} total):", page.pagination.total.unwrap_or(0));
    for link in page.data {
        println!("  {} - {}", link.slug, link.title);
    }

    Ok(())
}
