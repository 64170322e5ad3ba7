use super::super::domain::{ClaimDetails, ClaimField, FieldTag};

/// Edit route for each field role; roles without an entry are never editable
/// from the summary.
pub const fn route_template(tag: FieldTag) -> Option<&'static str> {
    match tag {
        FieldTag::Cost(_) => Some("/submissions/{submission_id}/claims/{claim_id}/{cost}"),
        FieldTag::AllowedTotal => Some("/submissions/{submission_id}/claims/{claim_id}/allowed-totals"),
        FieldTag::AssessedTotal => {
            Some("/submissions/{submission_id}/claims/{claim_id}/assessed-totals")
        }
        FieldTag::VatLiability => {
            Some("/submissions/{submission_id}/claims/{claim_id}/assessment-outcome")
        }
        FieldTag::BoltOn | FieldTag::FixedFee | FieldTag::GrandTotal => None,
    }
}

/// Change link for a field, present only while the field is assessable.
pub fn change_url(field: &ClaimField, details: &ClaimDetails) -> Option<String> {
    if !field.assessable {
        return None;
    }
    let template = route_template(field.tag)?;
    let cost_path = match field.tag {
        FieldTag::Cost(kind) => kind.path(),
        _ => "",
    };

    Some(
        template
            .replace("{submission_id}", &details.submission_id)
            .replace("{claim_id}", &details.claim_id.0)
            .replace("{cost}", cost_path),
    )
}
