use serde_json::json;

use crate::config::Config;
use crate::entities::{booking, user};

/// Outbound email client. Posts JSON messages to an HTTP mail relay.
/// Sending is best-effort: failures are logged and never fail the request
/// that triggered the notification.
#[derive(Clone)]
pub struct Mailer {
    client: reqwest::Client,
    api_url: Option<String>,
    api_key: String,
    from: String,
    pub admin_email: String,
}

impl Mailer {
    pub fn from_config(config: &Config) -> Self {
        if config.mail_api_url.is_none() {
            tracing::warn!("MAIL_API_URL not set, email notifications are disabled");
        }

        Self {
            client: reqwest::Client::new(),
            api_url: config.mail_api_url.clone(),
            api_key: config.mail_api_key.clone(),
            from: config.mail_from.clone(),
            admin_email: config.admin_email.clone(),
        }
    }

    pub async fn send(&self, to: &str, subject: &str, html: &str) {
        let Some(url) = &self.api_url else {
            tracing::debug!(to, subject, "Mailer disabled, dropping email");
            return;
        };

        let body = json!({
            "from": self.from,
            "to": to,
            "subject": subject,
            "html": html,
        });

        let result = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!(to, subject, "Email sent");
            }
            Ok(resp) => {
                tracing::warn!(to, subject, status = %resp.status(), "Mail relay rejected email");
            }
            Err(err) => {
                tracing::warn!(to, subject, error = %err, "Failed to send email");
            }
        }
    }

    /// Notify the back office about a new booking.
    pub async fn booking_created(
        &self,
        customer: &user::Model,
        course_name: &str,
        b: &booking::Model,
    ) {
        let subject = format!("[TEEtimeVN] New Booking - {}", course_name);
        let html = format!(
            "<h2>New Booking Received</h2>\
             <h3>Customer</h3>\
             <ul><li>Name: {}</li><li>Username: {}</li><li>Email: {}</li><li>Phone: {}</li></ul>\
             <h3>Booking</h3>\
             <ul><li>Course: {}</li><li>Play Date: {}</li><li>Tee Time: {}</li>\
             <li>Players: {}</li></ul>\
             <h3>Services</h3>\
             <ul><li>Caddy: {}</li><li>Golf Cart: {}</li><li>Rent Clubs: {}</li></ul>\
             <h3>Pricing (VND)</h3>\
             <ul><li>Green Fee: {}</li><li>Services: {}</li><li>Insurance: {}</li>\
             <li><strong>Total: {}</strong></li></ul>",
            customer.display_name(),
            customer.username,
            customer.email,
            customer.phone.as_deref().unwrap_or("Not provided"),
            course_name,
            b.play_date,
            b.play_time.format("%H:%M"),
            b.players,
            yes_no(b.has_caddy),
            yes_no(b.has_cart),
            yes_no(b.has_rent_clubs),
            b.green_fee,
            b.services_fee,
            b.insurance_fee,
            b.total_amount,
        );

        self.send(&self.admin_email, &subject, &html).await;
    }

    /// Notify the back office that the customer cancelled a booking.
    pub async fn booking_cancelled(
        &self,
        customer: &user::Model,
        course_name: &str,
        b: &booking::Model,
    ) {
        let subject = format!("[TEEtimeVN] Booking Cancelled - {}", course_name);
        let html = format!(
            "<h2>Booking Cancellation Notice</h2>\
             <ul><li>Booking ID: {}</li><li>Customer: {} ({})</li>\
             <li>Course: {}</li><li>Play Date: {}</li><li>Tee Time: {}</li>\
             <li>Players: {}</li><li>Total Amount: {} VND</li></ul>\
             <p>This booking has been cancelled by the customer.</p>",
            b.id,
            customer.display_name(),
            customer.email,
            course_name,
            b.play_date,
            b.play_time.format("%H:%M"),
            b.players,
            b.total_amount,
        );

        self.send(&self.admin_email, &subject, &html).await;
    }

    /// Notify the customer after an admin changed their booking status.
    pub async fn status_changed(
        &self,
        customer: &user::Model,
        course_name: &str,
        b: &booking::Model,
        old_status: &str,
        new_status: &str,
        notes: &str,
    ) {
        let headline = match new_status {
            "confirmed" => "Your booking has been confirmed!",
            "cancelled" => "Your booking has been cancelled.",
            "completed" => "Your booking has been completed. Thank you!",
            _ => "Your booking is pending review.",
        };

        let subject = format!("[TEEtimeVN] Booking {} - {}", b.id, headline);
        let notes_block = if notes.is_empty() {
            String::new()
        } else {
            format!("<p><strong>Notes:</strong> {}</p>", notes)
        };
        let html = format!(
            "<h2>Booking Status Update</h2>\
             <p>Dear {},</p>\
             <ul><li>Booking ID: {}</li><li>Course: {}</li>\
             <li>Date: {}</li><li>Time: {}</li>\
             <li>Previous Status: {}</li><li>New Status: {}</li></ul>\
             {}\
             <p>Best regards,<br>TEEtimeVN Team</p>",
            customer.display_name(),
            b.id,
            course_name,
            b.play_date,
            b.play_time.format("%H:%M"),
            old_status,
            new_status,
            notes_block,
        );

        self.send(&customer.email, &subject, &html).await;
    }

    /// Send a password reset link to the user.
    pub async fn password_reset(&self, email: &str, reset_url: &str) {
        let subject = "[TEEtimeVN] Password Reset Request";
        let html = format!(
            "<h2>Password Reset</h2>\
             <p>A password reset was requested for your account. The link below \
             is valid for 30 minutes.</p>\
             <p><a href=\"{}\">Reset your password</a></p>\
             <p>If you did not request this, you can ignore this email.</p>",
            reset_url,
        );

        self.send(email, subject, &html).await;
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}
