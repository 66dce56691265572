#[cfg(feature = "filings")]
use chrono::NaiveDate;

/// Options for filtering a filing history
///
/// Every criterion is optional; an empty `FilingOptions` passes the history through
/// unchanged. Criteria are combined with AND.
#[cfg(feature = "filings")]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilingOptions {
    /// Earliest filing date to keep (inclusive)
    pub start_date: Option<NaiveDate>,
    /// Latest filing date to keep (inclusive)
    pub end_date: Option<NaiveDate>,
    /// Exact form types to keep; `None` or an empty list keeps every form
    pub form_types: Option<Vec<String>>,
    /// Maximum number of matching filings; zero means no cap
    pub limit: Option<usize>,
}

#[cfg(feature = "filings")]
impl FilingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_date_range(self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.with_start_date(start_date).with_end_date(end_date)
    }

    pub fn with_form_type(mut self, form_type: impl Into<String>) -> Self {
        let form_type = form_type.into();
        self.form_types = Some(vec![form_type]);
        self
    }

    pub fn with_form_types(mut self, form_types: Vec<String>) -> Self {
        self.form_types = Some(form_types);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a filing with this date and form passes the date and form criteria.
    ///
    /// The limit is not part of this test; it is applied while iterating.
    pub fn matches(&self, filing_date: NaiveDate, form: &str) -> bool {
        if self.start_date.is_some_and(|start| filing_date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| filing_date > end) {
            return false;
        }
        match self.form_types.as_deref() {
            Some(forms) if !forms.is_empty() => forms.iter().any(|f| f == form),
            _ => true,
        }
    }

    /// The effective cap on matching filings, if any.
    pub fn effective_limit(&self) -> Option<usize> {
        self.limit.filter(|&limit| limit > 0)
    }
}

/// Options for searching the entity name to CIK registry
#[cfg(feature = "company")]
#[derive(Debug, Clone, Default)]
pub struct FilerSearchOptions {
    /// Case-insensitive substring the filer name must contain
    pub contains: Option<String>,
    /// CIKs to keep, in any width; compared after zero-padding
    pub ciks: Option<Vec<String>>,
    /// Maximum number of matches; zero means no cap
    pub limit: Option<usize>,
}

#[cfg(feature = "company")]
impl FilerSearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contains(mut self, contains: impl Into<String>) -> Self {
        self.contains = Some(contains.into());
        self
    }

    pub fn with_cik(mut self, cik: impl Into<String>) -> Self {
        self.ciks = Some(vec![cik.into()]);
        self
    }

    pub fn with_ciks(mut self, ciks: Vec<String>) -> Self {
        self.ciks = Some(ciks);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Options for searching the exchange-listed company registry
#[cfg(feature = "company")]
#[derive(Debug, Clone, Default)]
pub struct CompanySearchOptions {
    /// Exact ticker symbols to keep
    pub tickers: Option<Vec<String>>,
    /// CIKs to keep, in any width; compared after zero-padding
    pub ciks: Option<Vec<String>>,
    /// Exact exchange names to keep (e.g. "Nasdaq", "NYSE")
    pub exchanges: Option<Vec<String>>,
    /// Case-insensitive substring the company name must contain
    pub contains: Option<String>,
    /// Maximum number of matches; zero means no cap
    pub limit: Option<usize>,
}

#[cfg(feature = "company")]
impl CompanySearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.tickers = Some(vec![ticker.into()]);
        self
    }

    pub fn with_tickers(mut self, tickers: Vec<String>) -> Self {
        self.tickers = Some(tickers);
        self
    }

    pub fn with_ciks(mut self, ciks: Vec<String>) -> Self {
        self.ciks = Some(ciks);
        self
    }

    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchanges = Some(vec![exchange.into()]);
        self
    }

    pub fn with_contains(mut self, contains: impl Into<String>) -> Self {
        self.contains = Some(contains.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
