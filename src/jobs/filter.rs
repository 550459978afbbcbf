use std::collections::HashSet;

use crate::jobs::posting::JobPosting;

// Words that carry no signal when matching titles against the query.
const FILLER_WORDS: &[&str] = &[
    "job", "jobs", "work", "position", "role", "opening", "vacancy", "remote", "hiring",
];

// Roles excluded when the query is clearly a tech search.
const NON_TECH_ROLES: &[&str] = &[
    "marketing",
    "sales",
    "hr",
    "human resources",
    "recruiter",
    "recruiting",
    "account manager",
    "business development",
    "customer success",
    "content writer",
    "copywriter",
    "social media",
    "seo specialist",
    "finance",
    "accountant",
    "legal",
    "lawyer",
    "office manager",
    "administrative",
    "receptionist",
    "head of marketing",
    "head of sales",
    "vp of sales",
    "vp of marketing",
];

const TECH_KEYWORDS: &[&str] = &[
    "software", "engineer", "developer", "frontend", "backend", "fullstack", "devops", "data",
    "python", "java", "javascript", "react", "node",
];

fn synonyms(word: &str) -> &'static [&'static str] {
    match word {
        "backend" => &["backend", "back-end", "back end", "server-side", "api"],
        "frontend" => &["frontend", "front-end", "front end", "ui", "ux"],
        "fullstack" => &["fullstack", "full-stack", "full stack"],
        "engineer" => &["engineer", "engineering", "developer", "dev"],
        "developer" => &["developer", "development", "engineer", "dev"],
        "software" => &["software", "swe", "sde"],
        "devops" => &["devops", "dev-ops", "sre", "platform", "infrastructure"],
        "data" => &["data", "analytics", "ml", "machine learning", "ai"],
        _ => &[],
    }
}

/// Keep only postings whose title plausibly matches the search term.
/// Matching is synonym-expanded; obvious non-tech roles are dropped when
/// the query itself is a tech search.
pub fn filter_by_relevance(jobs: Vec<JobPosting>, query: &str) -> Vec<JobPosting> {
    let query_lower = query.to_lowercase();

    let query_words: Vec<&str> = query_lower
        .split_whitespace()
        .filter(|w| w.len() > 2 && !FILLER_WORDS.contains(w))
        .collect();

    let mut expanded_terms: HashSet<&str> = HashSet::new();
    for word in &query_words {
        expanded_terms.insert(word);
        for syn in synonyms(word) {
            expanded_terms.insert(syn);
        }
    }

    let searching_tech = TECH_KEYWORDS.iter().any(|kw| query_lower.contains(kw));

    jobs.into_iter()
        .filter(|job| {
            let title_lower = job.title.to_lowercase();

            if searching_tech && NON_TECH_ROLES.iter().any(|role| title_lower.contains(role)) {
                return false;
            }

            if query_words.is_empty() {
                return true;
            }

            expanded_terms.iter().any(|term| title_lower.contains(term))
        })
        .collect()
}

/// Drop repeated postings, keyed by case-insensitive title + company.
pub fn dedup_jobs(jobs: Vec<JobPosting>) -> Vec<JobPosting> {
    let mut seen = HashSet::new();
    jobs.into_iter()
        .filter(|job| {
            seen.insert(format!(
                "{}-{}",
                job.title.to_lowercase(),
                job.company.to_lowercase()
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(title: &str, company: &str) -> JobPosting {
        JobPosting {
            title: title.to_string(),
            company: company.to_string(),
            location: "Remote".to_string(),
            site: "test",
            job_url: "https://example.com/job".to_string(),
            date_posted: None,
            description: None,
        }
    }

    #[test]
    fn non_tech_roles_dropped_for_tech_queries() {
        let jobs = vec![
            posting("Backend Engineer", "Acme"),
            posting("Head of Marketing", "Acme"),
        ];
        let kept = filter_by_relevance(jobs, "backend engineer");
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "Backend Engineer");
    }

    #[test]
    fn synonyms_widen_the_match() {
        let jobs = vec![posting("SRE - Platform Team", "Acme")];
        let kept = filter_by_relevance(jobs, "devops engineer");
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn filler_only_query_keeps_everything() {
        let jobs = vec![posting("Barista", "Coffee Co"), posting("Pilot", "Air")];
        assert_eq!(filter_by_relevance(jobs, "jobs").len(), 2);
    }

    #[test]
    fn dedup_is_case_insensitive_and_keeps_first() {
        let jobs = vec![
            posting("Software Engineer", "Acme"),
            posting("software engineer", "ACME"),
            posting("Software Engineer", "Other"),
        ];
        let unique = dedup_jobs(jobs);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].company, "Acme");
    }
}
