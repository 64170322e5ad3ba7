use crate::infra::LoggingAssessmentGateway;
use amend_claim::assessment::{
    AssessmentGateway, AssessmentService, AssessmentServiceError, ClaimId, ClaimRecord,
    ClaimSessionStore, CostKind, FieldError, InMemoryClaimStore, Outcome, ReviewView, Row,
};
use amend_claim::config::AppConfig;
use amend_claim::error::AppError;
use clap::{ArgAction, Args};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct ReviewArgs {
    /// Claim record JSON as returned by the claims API
    #[arg(long)]
    pub(crate) record: PathBuf,
    /// Assessment outcome, e.g. paid-in-full or REDUCED_STILL_ESCAPED
    #[arg(long, value_parser = parse_outcome)]
    pub(crate) outcome: Option<Outcome>,
    /// Whether the provider is liable for VAT
    #[arg(long, action = ArgAction::Set)]
    pub(crate) vat_liability: Option<bool>,
    /// Assessed cost as <cost>=<amount>, e.g. profit-costs=950.00 (repeatable)
    #[arg(long = "cost", value_parser = parse_cost_edit)]
    pub(crate) costs: Vec<CostEdit>,
    /// Allowed totals as <vat>,<incl-vat>
    #[arg(long, value_parser = parse_totals)]
    pub(crate) allowed_totals: Option<TotalsEdit>,
    /// Assessed totals as <vat>,<incl-vat>
    #[arg(long, value_parser = parse_totals)]
    pub(crate) assessed_totals: Option<TotalsEdit>,
    /// Submit the assessment as this user once every answer is in place
    #[arg(long)]
    pub(crate) submit_as: Option<String>,
    /// Print the review payload as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CostEdit {
    pub(crate) cost: CostKind,
    pub(crate) value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TotalsEdit {
    pub(crate) vat: String,
    pub(crate) incl_vat: String,
}

pub(crate) fn parse_outcome(raw: &str) -> Result<Outcome, String> {
    raw.parse::<Outcome>().map_err(|err| err.to_string())
}

pub(crate) fn parse_cost_edit(raw: &str) -> Result<CostEdit, String> {
    let (path, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <cost>=<amount>, got '{raw}'"))?;
    let cost = CostKind::from_path(path.trim()).ok_or_else(|| {
        let known: Vec<&str> = CostKind::ALL.iter().map(|kind| kind.path()).collect();
        format!("unknown cost '{}' (expected one of {})", path.trim(), known.join(", "))
    })?;
    Ok(CostEdit {
        cost,
        value: value.trim().to_string(),
    })
}

pub(crate) fn parse_totals(raw: &str) -> Result<TotalsEdit, String> {
    let (vat, incl_vat) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected <vat>,<incl-vat>, got '{raw}'"))?;
    Ok(TotalsEdit {
        vat: vat.trim().to_string(),
        incl_vat: incl_vat.trim().to_string(),
    })
}

/// An edit the service refused, with the messages the form would show.
#[derive(Debug)]
pub(crate) struct RejectedEdit {
    pub(crate) edit: String,
    pub(crate) errors: Vec<FieldError>,
}

#[derive(Debug)]
pub(crate) struct ReviewRun {
    pub(crate) view: ReviewView,
    pub(crate) rejected: Vec<RejectedEdit>,
}

fn keep_or_reject(
    edit: String,
    result: Result<ReviewView, AssessmentServiceError>,
    run: &mut ReviewRun,
) -> Result<(), AppError> {
    match result {
        Ok(view) => run.view = view,
        Err(AssessmentServiceError::Invalid(errors)) => {
            run.rejected.push(RejectedEdit { edit, errors })
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

/// Apply the command-line answers to a freshly opened claim.
pub(crate) fn assess<S, G>(
    service: &AssessmentService<S, G>,
    record: ClaimRecord,
    args: &ReviewArgs,
) -> Result<ReviewRun, AppError>
where
    S: ClaimSessionStore + 'static,
    G: AssessmentGateway + 'static,
{
    let claim_id = ClaimId(record.id.clone());
    let mut run = ReviewRun {
        view: service.open(record)?,
        rejected: Vec::new(),
    };

    if let Some(outcome) = args.outcome {
        run.view = service.select_outcome(&claim_id, outcome, args.vat_liability)?;
    }

    for edit in &args.costs {
        let result = service.amend_cost(&claim_id, edit.cost, &edit.value);
        keep_or_reject(format!("{}={}", edit.cost.path(), edit.value), result, &mut run)?;
    }
    if let Some(totals) = &args.assessed_totals {
        let result = service.amend_assessed_totals(&claim_id, &totals.vat, &totals.incl_vat);
        keep_or_reject(
            format!("assessed-totals={},{}", totals.vat, totals.incl_vat),
            result,
            &mut run,
        )?;
    }
    if let Some(totals) = &args.allowed_totals {
        let result = service.amend_allowed_totals(&claim_id, &totals.vat, &totals.incl_vat);
        keep_or_reject(
            format!("allowed-totals={},{}", totals.vat, totals.incl_vat),
            result,
            &mut run,
        )?;
    }

    Ok(run)
}

pub(crate) fn run_review(args: ReviewArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let raw = std::fs::read_to_string(&args.record)?;
    let record: ClaimRecord = serde_json::from_str(&raw)?;
    let claim_id = ClaimId(record.id.clone());

    let gateway = Arc::new(LoggingAssessmentGateway::default());
    let service = AssessmentService::new(
        Arc::new(InMemoryClaimStore::default()),
        gateway,
        config.assessment,
    );

    let run = assess(&service, record, &args)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&run.view)?);
    } else {
        render_review(&run);
    }

    let Some(user_id) = args.submit_as else {
        return Ok(());
    };
    match service.submit(&claim_id, &user_id) {
        Ok(receipt) => println!(
            "\nSubmitted assessment {} for claim {}",
            receipt.assessment_id, receipt.claim_id
        ),
        Err(AssessmentServiceError::Invalid(errors)) => {
            println!("\nSubmission blocked:");
            for error in errors {
                println!("  - {}: {}", error.field_id, error.message_key);
            }
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn render_rows(rows: &[Row]) {
    for row in rows.iter().filter(|row| row.visible) {
        let [submitted, calculated, assessed] = row.cells();
        let marker = if row.needs_value { " *" } else { "" };
        let link = row.change_url.as_deref().unwrap_or("");
        println!(
            "  {:<42} {:>14} {:>14} {:>14}{marker}  {link}",
            row.label, submitted, calculated, assessed
        );
    }
}

fn render_review(run: &ReviewRun) {
    let view = &run.view;
    println!(
        "Claim {} (submission {}, {})",
        view.claim_id, view.submission_id, view.area_of_law
    );
    println!("Outcome: {}", view.outcome.unwrap_or("not selected"));
    if let Some(message) = &view.last_edited {
        println!("{} [{}]", message.key, message.params.join(" | "));
    }

    println!(
        "\n  {:<42} {:>14} {:>14} {:>14}",
        "", "Claimed", "Calculated", "Assessed"
    );
    render_rows(&view.rows);

    if let Some(rows) = &view.assessed_totals {
        println!("\nAssessed totals");
        render_rows(rows);
    }
    if let Some(rows) = &view.allowed_totals {
        println!("\nAllowed totals");
        render_rows(rows);
    }

    if !run.rejected.is_empty() {
        println!("\nRejected edits:");
        for rejected in &run.rejected {
            let keys: Vec<&str> = rejected
                .errors
                .iter()
                .map(|error| error.message_key.as_str())
                .collect();
            println!("  - {}: {}", rejected.edit, keys.join(", "));
        }
    }

    if !view.errors.is_empty() {
        println!("\nStill to answer:");
        for error in &view.errors {
            println!("  - {} ({})", error.field_id, error.message_key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amend_claim::assessment::FieldKey;
    use amend_claim::config::AssessmentConfig;
    use serde_json::json;

    fn crime_record() -> ClaimRecord {
        serde_json::from_value(json!({
            "id": "claim-31",
            "submissionId": "submission-31",
            "areaOfLaw": "CRIME_LOWER",
            "isVatApplicable": true,
            "netProfitCostsAmount": "800.00",
            "netDisbursementAmount": "60.00",
            "disbursementsVatAmount": "12.00",
            "travelCostsAmount": "25.00",
            "netWaitingCostsAmount": "10.00",
            "feeCalculation": {
                "feeCode": "INVC",
                "fixedFeeAmount": "280.00",
                "boltOnDetails": { "escapeCaseFlag": true }
            }
        }))
        .expect("valid record")
    }

    fn service() -> (
        AssessmentService<InMemoryClaimStore, LoggingAssessmentGateway>,
        LoggingAssessmentGateway,
    ) {
        let gateway = LoggingAssessmentGateway::default();
        let service = AssessmentService::new(
            Arc::new(InMemoryClaimStore::default()),
            Arc::new(gateway.clone()),
            AssessmentConfig::default(),
        );
        (service, gateway)
    }

    #[test]
    fn cost_edits_parse_path_and_amount() {
        assert_eq!(
            parse_cost_edit("profit-costs = 950.00"),
            Ok(CostEdit {
                cost: CostKind::ProfitCosts,
                value: "950.00".to_string(),
            })
        );
        assert!(parse_cost_edit("950.00").is_err());
        let unknown = parse_cost_edit("taxi=5").expect_err("unknown cost");
        assert!(unknown.contains("waiting-costs"), "{unknown}");
    }

    #[test]
    fn totals_and_outcomes_parse() {
        assert_eq!(
            parse_totals("20.00, 120.00"),
            Ok(TotalsEdit {
                vat: "20.00".to_string(),
                incl_vat: "120.00".to_string(),
            })
        );
        assert!(parse_totals("20.00").is_err());
        assert_eq!(parse_outcome("paid-in-full"), Ok(Outcome::PaidInFull));
        assert!(parse_outcome("halved").is_err());
    }

    #[test]
    fn invalid_edits_are_reported_without_aborting() {
        let (service, _) = service();
        let args = ReviewArgs {
            outcome: Some(Outcome::PaidInFull),
            vat_liability: Some(true),
            costs: vec![
                CostEdit {
                    cost: CostKind::ProfitCosts,
                    value: "1.001".to_string(),
                },
                CostEdit {
                    cost: CostKind::TravelCosts,
                    value: "20".to_string(),
                },
            ],
            ..ReviewArgs::default()
        };

        let run = assess(&service, crime_record(), &args).expect("review runs");
        assert_eq!(run.rejected.len(), 1);
        assert_eq!(run.rejected[0].edit, "profit-costs=1.001");
        assert_eq!(
            run.rejected[0].errors[0].message_key,
            "profitCosts.error.decimalPlaces"
        );

        let travel = run
            .view
            .rows
            .iter()
            .find(|row| row.key == FieldKey::Travel)
            .expect("travel row");
        assert_eq!(travel.cells()[2], "£20.00");
        assert!(run.view.assessed_totals.is_some());
    }

    #[test]
    fn completed_review_can_be_submitted() {
        let (service, gateway) = service();
        let args = ReviewArgs {
            outcome: Some(Outcome::PaidInFull),
            vat_liability: Some(false),
            assessed_totals: Some(TotalsEdit {
                vat: "0".to_string(),
                incl_vat: "895".to_string(),
            }),
            allowed_totals: Some(TotalsEdit {
                vat: "0".to_string(),
                incl_vat: "895".to_string(),
            }),
            ..ReviewArgs::default()
        };

        let run = assess(&service, crime_record(), &args).expect("review runs");
        assert!(run.rejected.is_empty());
        assert!(run.view.errors.is_empty(), "{:?}", run.view.errors);

        let receipt = service
            .submit(&ClaimId("claim-31".to_string()), "caseworker-9")
            .expect("submit");
        assert_eq!(receipt.assessment_id, "local-000001");
        assert_eq!(gateway.accepted()[0].is_vat_applicable, Some(false));
    }
}
