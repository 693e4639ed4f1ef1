use serde::Serialize;

use super::domain::EvidenceBundle;

/// Fixed user turn sent alongside the composed instructions.
pub const EVALUATION_REQUEST: &str = "Evaluate this candidate for the job above.";

/// Placeholder for a source that produced no usable evidence.
pub const NOT_PROVIDED: &str = "Not provided";

const EVALUATION_POLICY: &str = "\
For each requirement, provide a brief, evidence-based data point from the candidate's profile (GitHub, LinkedIn, Twitter, etc.).

- Years of experience and location: prefer LinkedIn when available, since it is updated more often and is more reliable for these fields. Use GitHub or other sources only when they carry explicit, verifiable information (such as a public resume or a clear employment history), and cite the source link. If no reliable source exists, state that the information is not verifiable. Do not guess or infer.
- Technical skills, project work and open-source contributions: prefer GitHub as the primary source, and include LinkedIn evidence when it adds value or context. Cite every source used.
- Professional background, education and job titles: prefer LinkedIn when available, and supplement with GitHub or other sources when relevant.
- For every requirement, use the source most likely to be accurate and current for that requirement. When both sources carry relevant evidence, include both and cite their respective links.
- If no reliable source is available for a requirement, state that the information is not verifiable. Do not guess or infer.

Whenever you reference LinkedIn, GitHub, Twitter, a blog or any other source, give the source link (repository URL, LinkedIn profile, tweet, blog post) in the analysis table or the justification.

Produce exactly one structured analysis table mapping each requirement to the candidate's evidence, source(s) and verifiability notes. Do not include a second summary table.

Begin the report with these lines, each on its own line, using \"Unknown\" when a value is not available:
**Name:** <candidate name>
**Location:** <location>
**LinkedIn:** <LinkedIn profile URL>
**GitHub:** <GitHub profile URL>

Finish with a recommendation line using exactly one of these five levels: Strongly Shortlist, Shortlist, Neutral, Reject, Strongly Reject, followed by a one-sentence justification:
**Recommendation:** <level>";

/// Builds the system instructions for one candidate evaluation.
///
/// Evidence is embedded as pretty-printed JSON. A missing source, or a
/// LinkedIn extraction without any structured field, is written as
/// [`NOT_PROVIDED`] rather than an empty object.
pub fn compose_instructions(bundle: &EvidenceBundle) -> String {
    let github = bundle
        .code_host
        .as_ref()
        .map(render_json)
        .unwrap_or_else(|| NOT_PROVIDED.to_string());
    let linkedin = bundle
        .professional
        .as_ref()
        .and_then(|evidence| evidence.usable_profile())
        .map(render_json)
        .unwrap_or_else(|| NOT_PROVIDED.to_string());

    format!(
        "You are an expert technical recruiter. Your task is to evaluate a candidate for the following job:\n\
         \n\
         [JOB REQUIREMENTS]\n\
         {job}\n\
         \n\
         [CANDIDATE DATA]\n\
         GitHub: {github}\n\
         LinkedIn: {linkedin}\n\
         \n\
         {EVALUATION_POLICY}\n",
        job = bundle.job_requirements,
    )
}

fn render_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| NOT_PROVIDED.to_string())
}
