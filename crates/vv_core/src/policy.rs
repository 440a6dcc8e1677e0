use crate::domain::{ArticleVerdict, NewsSleuthOutput, PremiseCheck};
use crate::error::AppError;

/// Reality-check rule for article verdicts.
///
/// When the substantive claims of an article are future-dated, hypothetical or false, the
/// verdict is restricted to `constrained_verdicts`, the score must stay below
/// `score_ceiling` and the issue must be flagged. A metadata-only discrepancy (such as a
/// slightly wrong publish date) must be flagged but does not restrict the verdict.
///
/// The boundary between the two cases is a judgment call made by the model; the values
/// here are tunable and are rendered into the prompt from the same struct that checks
/// the answer.
#[derive(Debug, Clone, PartialEq)]
pub struct RealityCheckPolicy {
    pub score_ceiling: f64,
    pub constrained_verdicts: Vec<ArticleVerdict>,
}

impl Default for RealityCheckPolicy {
    fn default() -> Self {
        Self {
            score_ceiling: 40.0,
            constrained_verdicts: vec![
                ArticleVerdict::LikelyFake,
                ArticleVerdict::SatireParody,
                ArticleVerdict::Uncertain,
            ],
        }
    }
}

impl RealityCheckPolicy {
    pub fn constrained_labels(&self) -> Vec<&'static str> {
        self.constrained_verdicts.iter().map(|v| v.as_str()).collect()
    }

    pub fn check(&self, out: &NewsSleuthOutput) -> Result<(), AppError> {
        let mut violations = Vec::new();
        let flagged = out.flagged_content.iter().any(|s| !s.trim().is_empty());

        match out.premise_check {
            PremiseCheck::HypotheticalOrFalse => {
                if !self.constrained_verdicts.contains(&out.verdict) {
                    violations.push(format!(
                        "verdict {:?} is not allowed for a hypothetical/non-factual premise",
                        out.verdict.as_str()
                    ));
                }
                if out.overall_score >= self.score_ceiling {
                    violations.push(format!(
                        "overallScore {} must be below {} for a hypothetical/non-factual premise",
                        out.overall_score, self.score_ceiling
                    ));
                }
                if !flagged {
                    violations.push(
                        "flaggedContent must name the hypothetical/non-factual premise".to_string(),
                    );
                }
            }
            PremiseCheck::MetadataDiscrepancy => {
                if !flagged {
                    violations
                        .push("flaggedContent must note the metadata discrepancy".to_string());
                }
            }
            PremiseCheck::Factual | PremiseCheck::Unverifiable => {}
        }

        if violations.is_empty() {
            return Ok(());
        }
        Err(AppError::new(
            "MODEL_OUTPUT_POLICY_VIOLATION",
            "Model output violates the reality-check policy",
        )
        .with_details(violations.join("; ")))
    }
}
