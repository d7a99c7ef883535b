//! Email service for forwarding contact enquiries.
//!
//! Uses SMTP via lettre for delivery with Askama HTML templates.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;

/// A contact enquiry submitted from the public site.
#[derive(Debug, Clone)]
pub struct ContactEnquiry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    /// Set when the enquiry was started from a service card.
    pub service_name: Option<String>,
}

/// HTML template for a contact enquiry email.
#[derive(Template)]
#[template(path = "email/contact_enquiry.html")]
struct ContactEnquiryHtml<'a> {
    enquiry: &'a ContactEnquiry,
}

/// Plain text template for a contact enquiry email.
#[derive(Template)]
#[template(path = "email/contact_enquiry.txt")]
struct ContactEnquiryText<'a> {
    enquiry: &'a ContactEnquiry,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Email service for forwarding enquiries to the practice inbox.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    contact_recipient: String,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
            contact_recipient: config.contact_recipient.clone(),
        })
    }

    /// Forward a contact enquiry to the practice inbox.
    ///
    /// The reply-to header is set to the enquirer so a reply from the
    /// inbox goes straight back to them.
    ///
    /// # Errors
    ///
    /// Returns error if the email fails to render or send.
    pub async fn send_contact_enquiry(&self, enquiry: &ContactEnquiry) -> Result<(), EmailError> {
        let subject = enquiry.service_name.as_ref().map_or_else(
            || format!("New Contact Enquiry from {}", enquiry.name),
            |service| format!("Service Enquiry: {service} from {}", enquiry.name),
        );

        let html = ContactEnquiryHtml { enquiry }.render()?;
        let text = ContactEnquiryText { enquiry }.render()?;

        let message = Message::builder()
            .from(
                format!("\"Ruhiya Contact Form\" <{}>", self.from_address)
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .reply_to(
                enquiry
                    .email
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(enquiry.email.clone()))?,
            )
            .to(self
                .contact_recipient
                .parse()
                .map_err(|_| EmailError::InvalidAddress(self.contact_recipient.clone()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html),
                    ),
            )?;

        self.mailer.send(message).await?;
        Ok(())
    }
}
