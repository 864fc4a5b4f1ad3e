//! Search URL assembly.
//!
//! Terms are joined with `+` by plain string concatenation. Nothing is
//! percent-encoded, and repeated spaces become repeated `+`.

/// One scrape request as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub job: String,
    pub location: String,
    /// Appended to the job terms, not sent as its own parameter.
    pub salary: Option<String>,
    pub no_cache: bool,
}

fn join_terms(text: &str) -> String {
    text.split(' ').collect::<Vec<_>>().join("+")
}

impl SearchQuery {
    pub fn new(job: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            job: job.into(),
            location: location.into(),
            salary: None,
            no_cache: false,
        }
    }

    pub fn with_salary(mut self, salary: impl Into<String>) -> Self {
        self.salary = Some(salary.into());
        self
    }

    pub fn bypass_cache(mut self, no_cache: bool) -> Self {
        self.no_cache = no_cache;
        self
    }

    /// `q=<job+terms>[+salary]&l=<location+terms>`
    pub fn query_string(&self) -> String {
        let mut job = format!("q={}", join_terms(&self.job));
        if let Some(salary) = self.salary.as_deref().filter(|s| !s.is_empty()) {
            job.push('+');
            job.push_str(salary);
        }
        format!("{job}&l={}", join_terms(&self.location))
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{base_url}{}", self.query_string())
    }
}

/// URL of the results page starting at `offset`.
pub fn page_url(base_url: &str, offset: usize) -> String {
    format!("{base_url}&start={offset}")
}
