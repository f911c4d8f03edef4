// LLM prompt constants for tailored resume generation.

/// System prompt for resume writing. Combined with the shared JSON-only instruction.
pub const RESUME_SYSTEM: &str = "You are an expert ATS Resume Writer & Career Coach. \
    You will be given a Candidate's Portfolio (Projects, Skills, Certs) and a Target Job Description. \
    Your task is to write the content for a high-impact, ATS-optimized resume.";

/// Resume prompt template.
/// Replace: {portfolio_json}, {job_description}
pub const RESUME_PROMPT_TEMPLATE: &str = r#"CANDIDATE PORTFOLIO:
{portfolio_json}

TARGET JOB DESCRIPTION:
{job_description}

Rules:
1. PROFESSIONAL SUMMARY: Write a 3-sentence summary tailored exactly to the JD keywords.
2. SKILLS: Select the top 10 skills from the portfolio that match the JD.
3. PROJECTS: Select the 3 most relevant projects. Rewrite their descriptions to emphasize impacts & results relevant to the JD.
4. EXPERIENCE: If the portfolio has no work experience, focus heavily on Projects.
5. OUTPUT FORMAT: Return a JSON object with this EXACT schema:
{
  "summary": "Three sentences.",
  "skills": ["Rust", "Distributed Systems"],
  "projects": [
    {"name": "Project name", "tech": "Rust, Tokio", "bullet_points": ["Impact-focused bullet"]}
  ],
  "certifications": ["Certification name (Provider)"]
}

Action: Generate the resume content now in JSON format."#;
