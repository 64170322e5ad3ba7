//! Display rows for the claim summary and review pages.
//!
//! Rows are the only thing the rendering layer consumes. Every projection here
//! is a pure function of the aggregate; nothing is written back.

pub mod format;
mod links;

pub use links::{change_url, route_template};

use rust_decimal::Decimal;
use serde::Serialize;

use super::domain::{
    AssessmentInfo, ClaimAggregate, ClaimDetails, ClaimField, ClaimId, CostKind, FieldKey,
    FieldTag, FieldValue, Outcome,
};
use super::validation::{get_errors, FieldError};
use format::{format_cell, format_date, format_time};

/// One line of the three-column claim table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub key: FieldKey,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculated: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessed: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_url: Option<String>,
    pub visible: bool,
    pub needs_value: bool,
}

impl Row {
    pub fn project(field: &ClaimField, details: &ClaimDetails) -> Self {
        let zero_filled = renders_missing_as_zero(field.tag);
        let cell = |value: Option<FieldValue>| {
            if zero_filled {
                value.or(Some(FieldValue::Amount(Decimal::ZERO)))
            } else {
                value
            }
        };

        Self {
            key: field.key,
            label: field.key.label_key(),
            submitted: cell(field.submitted),
            calculated: cell(field.calculated),
            assessed: cell(field.assessed),
            change_url: change_url(field, details),
            visible: match field.tag {
                FieldTag::AssessedTotal => field.assessable,
                _ => true,
            },
            needs_value: field.is_required_and_missing(),
        }
    }

    /// Submitted, calculated and assessed columns as display text.
    pub fn cells(&self) -> [String; 3] {
        [
            format_cell(self.submitted.as_ref()),
            format_cell(self.calculated.as_ref()),
            format_cell(self.assessed.as_ref()),
        ]
    }
}

/// Secondary costs and allowed totals show `£0.00` instead of a blank cell.
fn renders_missing_as_zero(tag: FieldTag) -> bool {
    match tag {
        FieldTag::Cost(kind) => !matches!(
            kind,
            CostKind::ProfitCosts | CostKind::Disbursements | CostKind::DisbursementsVat
        ),
        FieldTag::AllowedTotal => true,
        FieldTag::BoltOn
        | FieldTag::AssessedTotal
        | FieldTag::VatLiability
        | FieldTag::FixedFee
        | FieldTag::GrandTotal => false,
    }
}

/// A bolt-on is listed when a value was submitted for it. A false flag means
/// the add-on was not claimed; a zero count is still an answer. Count bolt-ons
/// priced by the fee calculation are listed even without a submitted count, so
/// the fee that will be sent is never hidden.
fn shows_bolt_on(field: &ClaimField) -> bool {
    match field.submitted {
        None => field.key != FieldKey::SubstantiveHearing && field.calculated.is_some(),
        Some(FieldValue::Flag(claimed)) => claimed,
        Some(FieldValue::Count(_) | FieldValue::Amount(_)) => true,
    }
}

fn build_rows(aggregate: &ClaimAggregate, include_bolt_ons: bool) -> Vec<Row> {
    let details = aggregate.details();
    let mut fields: Vec<&ClaimField> = vec![
        &details.fixed_fee,
        &details.net_profit_cost,
        &details.net_disbursement_amount,
        &details.disbursement_vat_amount,
    ];
    fields.extend(aggregate.type_specific_costs());

    if include_bolt_ons {
        if let ClaimAggregate::Civil(claim) = aggregate {
            fields.extend(
                claim
                    .bolt_ons
                    .in_display_order()
                    .into_iter()
                    .flatten()
                    .filter(|field| shows_bolt_on(field)),
            );
        }
    }

    fields.push(&details.vat_claimed);
    if !details.has_assessment {
        fields.push(&details.total_amount);
    }

    fields
        .into_iter()
        .map(|field| Row::project(field, details))
        .collect()
}

/// Rows for the claim summary page, bolt-ons included.
pub fn summary_rows(aggregate: &ClaimAggregate) -> Vec<Row> {
    build_rows(aggregate, true)
}

/// Rows for the check-your-answers page.
pub fn review_rows(aggregate: &ClaimAggregate) -> Vec<Row> {
    build_rows(aggregate, false)
}

pub fn assessed_total_rows(aggregate: &ClaimAggregate) -> Vec<Row> {
    let details = aggregate.details();
    vec![
        Row::project(&details.assessed_total_vat, details),
        Row::project(&details.assessed_total_incl_vat, details),
    ]
}

pub fn allowed_total_rows(aggregate: &ClaimAggregate) -> Vec<Row> {
    let details = aggregate.details();
    vec![
        Row::project(&details.allowed_total_vat, details),
        Row::project(&details.allowed_total_incl_vat, details),
    ]
}

/// The assessed totals section is only rendered while it can be edited.
pub fn assessed_totals_visible(aggregate: &ClaimAggregate) -> bool {
    let details = aggregate.details();
    details.assessed_total_vat.assessable || details.assessed_total_incl_vat.assessable
}

/// Message key plus positional parameters for the rendering layer to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageWithParams {
    pub key: String,
    pub params: Vec<String>,
}

/// "Last assessed by ... on ... at ..." banner for a previously assessed claim.
pub fn last_edited_message(
    info: &AssessmentInfo,
    display_name: Option<&str>,
) -> Option<MessageWithParams> {
    let date = info.last_assessment_date.as_ref()?;
    let outcome = info
        .last_assessment_outcome
        .map(Outcome::label_key)
        .unwrap_or_default()
        .to_string();

    let display_name = display_name
        .map(str::trim)
        .filter(|name| !name.is_empty());

    Some(match display_name {
        Some(name) => MessageWithParams {
            key: "claimSummary.lastAssessmentText".to_string(),
            params: vec![name.to_string(), format_date(date), format_time(date), outcome],
        },
        None => MessageWithParams {
            key: "claimSummary.lastAssessmentText.noUser".to_string(),
            params: vec![format_date(date), format_time(date), outcome],
        },
    })
}

/// Everything the review page needs in one payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    pub claim_id: ClaimId,
    pub submission_id: String,
    pub area_of_law: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<&'static str>,
    pub rows: Vec<Row>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessed_totals: Option<Vec<Row>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_totals: Option<Vec<Row>>,
    pub errors: Vec<FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_edited: Option<MessageWithParams>,
}

pub fn review_view(aggregate: &ClaimAggregate) -> ReviewView {
    let details = aggregate.details();
    let outcome_selected = details.assessment_outcome.is_some();

    ReviewView {
        claim_id: details.claim_id.clone(),
        submission_id: details.submission_id.clone(),
        area_of_law: details.area_of_law.label_key(),
        outcome: details.assessment_outcome.map(Outcome::label_key),
        rows: review_rows(aggregate),
        assessed_totals: assessed_totals_visible(aggregate).then(|| assessed_total_rows(aggregate)),
        allowed_totals: outcome_selected.then(|| allowed_total_rows(aggregate)),
        errors: get_errors(aggregate),
        last_edited: details
            .last_assessment
            .as_ref()
            .and_then(|info| last_edited_message(info, info.last_assessed_by.as_deref())),
    }
}
