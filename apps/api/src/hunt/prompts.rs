// LLM prompt constants for job extraction.

/// System prompt for job extraction. The answer must be a bare JSON array.
pub const EXTRACTION_SYSTEM: &str = "You are an expert Job Hunter. Your goal is to extract structured job data. \
    You will be given Markdown content of a job search page. \
    Extract valid job listings. \
    For each job, extract: 'title', 'company', 'location', 'link', 'summary' (20 words max), \
    and 'source' (e.g. LinkedIn, YC). \
    CRITICAL: Output ONLY a valid JSON array of objects. Do not write markdown blocks or text. \
    Example: [{\"title\": \"...\", \"company\": \"...\", \"location\": \"...\", \"link\": \"...\", \"summary\": \"...\", \"source\": \"...\"}] \
    If no jobs are found, output an empty array: []";

/// Extraction prompt template.
/// Replace: {role}, {location}, {content}
pub const EXTRACTION_PROMPT_TEMPLATE: &str = "Extract job listings from this content matching role='{role}' and location='{location}'.
Content:
{content}";
