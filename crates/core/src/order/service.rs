//! Order submission service implementation.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use podorder_shared::types::OrderId;
use tracing::{error, info};

use super::error::SubmissionError;
use super::types::{
    AttachmentCategory, NewOrderRecord, OrderItem, OrderMode, OrderStatus, OrderSubmission,
    SubmittedOrder,
};
use crate::storage::{ObjectLocator, ObjectStore};
use crate::upload::{Attachment, DestinationNamespace, UploadPipeline, naming};

/// Repository trait for order persistence.
///
/// Implemented outside this crate by whatever backs the order tables.
pub trait OrderRecordStore: Send + Sync {
    /// Insert the order row.
    fn create_order(
        &self,
        record: NewOrderRecord,
    ) -> impl Future<Output = Result<(), SubmissionError>> + Send;

    /// Insert the product lines of an order.
    fn create_items(
        &self,
        order_id: &OrderId,
        items: Vec<OrderItem>,
    ) -> impl Future<Output = Result<(), SubmissionError>> + Send;
}

/// Service that turns a customer submission into a stored order.
pub struct SubmissionService<S: ObjectStore, R: OrderRecordStore> {
    pipeline: Arc<UploadPipeline<S>>,
    records: Arc<R>,
}

impl<S: ObjectStore, R: OrderRecordStore> SubmissionService<S, R> {
    /// Create a new submission service.
    #[must_use]
    pub fn new(pipeline: Arc<UploadPipeline<S>>, records: Arc<R>) -> Self {
        Self { pipeline, records }
    }

    /// Validate, upload attachments, and record a new order.
    ///
    /// The three attachment categories upload concurrently, each through its
    /// own paced pipeline call. A category that loses only some files still
    /// counts as uploaded.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The submission fails validation (nothing is uploaded)
    /// - Every file of a category fails to upload
    /// - The record store rejects the order or its items
    pub async fn submit(&self, submission: OrderSubmission) -> Result<SubmittedOrder, SubmissionError> {
        validate_submission(&submission)?;

        let order_id = OrderId::generate();
        let result = self.process(&order_id, submission).await;

        if let Err(e) = &result {
            error!(error = %e, order_id = %order_id, "Order submission failed");
        }
        result
    }

    async fn process(
        &self,
        order_id: &OrderId,
        submission: OrderSubmission,
    ) -> Result<SubmittedOrder, SubmissionError> {
        let (designs, mockups, payment) = tokio::try_join!(
            self.upload_category(AttachmentCategory::Design, &submission.design_files, order_id),
            self.upload_category(AttachmentCategory::Mockup, &submission.mockup_files, order_id),
            self.upload_category(
                AttachmentCategory::PaymentProof,
                &submission.payment_proof,
                order_id
            ),
        )?;

        let design_urls = with_links(designs, submission.design_links);
        let mockup_urls = with_links(mockups, submission.mockup_links);
        if design_urls.is_empty() || mockup_urls.is_empty() {
            return Err(SubmissionError::validation(
                "both design and mockup files or links are required",
            ));
        }

        info!(
            order_id = %order_id,
            designs = design_urls.len(),
            mockups = mockup_urls.len(),
            payment_proofs = payment.len(),
            "Order attachments uploaded"
        );

        let customer = submission.customer;
        let record = NewOrderRecord {
            order_id: order_id.clone(),
            name: customer.name,
            brand_name: customer.brand_name,
            address: format!("{}\nPincode: {}", customer.address, customer.pincode),
            phone: customer.phone,
            whatsapp: customer.whatsapp,
            payment_info: submission.payment_info,
            status: OrderStatus::Pending,
            design_urls: design_urls.clone(),
            mockup_urls: mockup_urls.clone(),
            payment_screenshot_urls: payment.clone(),
            order_mode: submission.mode.as_str().to_string(),
            cod_amount: submission.mode.cod_amount().map(String::from),
            created_at: Utc::now(),
        };

        self.records.create_order(record).await?;
        let items = submission.items.into_iter().map(resolve_color).collect();
        self.records.create_items(order_id, items).await?;

        info!(order_id = %order_id, "Order recorded");

        Ok(SubmittedOrder {
            order_id: order_id.clone(),
            design_urls,
            mockup_urls,
            payment_proof_urls: payment,
        })
    }

    async fn upload_category(
        &self,
        category: AttachmentCategory,
        files: &[Attachment],
        order_id: &OrderId,
    ) -> Result<Vec<String>, SubmissionError> {
        let namespace = DestinationNamespace::new(category.namespace_for(order_id))
            .map_err(|source| SubmissionError::Upload { category, source })?;

        let locators = self
            .pipeline
            .upload_all(files, &namespace, Some(order_id.as_str()))
            .await
            .map_err(|source| SubmissionError::Upload { category, source })?;

        Ok(locators.into_iter().map(ObjectLocator::into_string).collect())
    }
}

/// Record the resolved color, so `custom` lines carry the customer's color name.
fn resolve_color(mut item: OrderItem) -> OrderItem {
    if item.color == "custom" {
        item.color = item.effective_color().to_string();
    }
    item
}

fn with_links(mut urls: Vec<String>, links: Vec<String>) -> Vec<String> {
    urls.extend(links.into_iter().filter(|l| !l.trim().is_empty()));
    urls
}

fn is_phone_number(value: &str) -> bool {
    value.len() == 10 && value.chars().all(|c| c.is_ascii_digit())
}

fn has_any_link(links: &[String]) -> bool {
    links.iter().any(|l| !l.trim().is_empty())
}

/// Check a submission before anything is uploaded.
///
/// # Errors
///
/// Returns a validation error describing the first problem found.
pub fn validate_submission(submission: &OrderSubmission) -> Result<(), SubmissionError> {
    let customer = &submission.customer;
    let required = [
        ("name", &customer.name),
        ("brand name", &customer.brand_name),
        ("address", &customer.address),
        ("pincode", &customer.pincode),
    ];
    if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
        return Err(SubmissionError::validation(format!("{field} is required")));
    }

    if !is_phone_number(&customer.phone) || !is_phone_number(&customer.whatsapp) {
        return Err(SubmissionError::validation("phone numbers must be 10 digits"));
    }

    if let OrderMode::Cod { amount } = &submission.mode {
        if amount.trim().is_empty() {
            return Err(SubmissionError::validation("COD amount is required"));
        }
    }

    if submission.items.is_empty() {
        return Err(SubmissionError::validation("at least one product is required"));
    }
    for item in &submission.items {
        if item.product.trim().is_empty() {
            return Err(SubmissionError::validation("every item needs a product"));
        }
        if item.quantity == 0 {
            return Err(SubmissionError::validation(format!(
                "quantity for '{}' must be at least 1",
                item.product
            )));
        }
        if item.effective_color().trim().is_empty() {
            return Err(SubmissionError::validation(format!(
                "color for '{}' is required",
                item.product
            )));
        }
    }

    let has_designs = !submission.design_files.is_empty() || has_any_link(&submission.design_links);
    let has_mockups = !submission.mockup_files.is_empty() || has_any_link(&submission.mockup_links);
    if !has_designs || !has_mockups {
        return Err(SubmissionError::validation(
            "both design and mockup files or links are required",
        ));
    }

    if submission.payment_proof.is_empty() {
        return Err(SubmissionError::validation("payment screenshot is required"));
    }

    Ok(())
}

/// File name offered when staff download an order attachment.
///
/// Format: `{order_id}-{label}.{ext}`, with the extension taken from the URL path.
#[must_use]
pub fn download_file_name(order_id: &OrderId, label: &str, url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let last_segment = path.rsplit('/').next().unwrap_or_default();

    match naming::extension(last_segment) {
        Some(ext) => format!("{order_id}-{label}.{ext}"),
        None => format!("{order_id}-{label}"),
    }
}
