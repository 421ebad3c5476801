/// List-query parsing and application shared by every list endpoint
///
/// Query convention: `keyword`, one param per declared filter (`ALL` or blank
/// means unfiltered), inclusive `startDate`/`endDate`, 1-based `page` and
/// `pageSize`.
use super::ApiFailure;
use crate::apis::{PageData, QueryParams};
use crate::config::PaginationConfig;
use crate::domain::ListRecord;
use crate::table::{ALL_MARKER, DATE_FORMAT, RANGE_END_PARAM, RANGE_START_PARAM};
use chrono::NaiveDate;

pub const KEYWORD_PARAM: &str = "keyword";
pub const PAGE_PARAM: &str = "page";
pub const PAGE_SIZE_PARAM: &str = "pageSize";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub keyword: Option<String>,
    /// (param, canonical wire value)
    pub filters: Vec<(&'static str, &'static str)>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page: usize,
    pub page_size: usize,
}

fn normalize_choice(value: Option<&String>) -> Option<&str> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_MARKER) {
            None
        } else {
            Some(trimmed)
        }
    })
}

fn parse_date(params: &QueryParams, name: &str) -> Result<Option<NaiveDate>, ApiFailure> {
    match normalize_choice(params.get(name)) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(Some)
            .map_err(|_| ApiFailure::invalid(format!("{} must be YYYY-MM-DD, got '{}'", name, raw))),
    }
}

fn parse_number(params: &QueryParams, name: &str) -> Result<Option<usize>, ApiFailure> {
    match params.get(name).map(|raw| raw.trim()).filter(|raw| !raw.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<usize>()
            .map(Some)
            .map_err(|_| ApiFailure::invalid(format!("{} must be a positive integer, got '{}'", name, raw))),
    }
}

impl ListQuery {
    /// Parse query params for records of type `R`
    ///
    /// Page and page size are clamped rather than rejected; malformed numbers,
    /// dates and enum values are `INVALID_PARAMS`.
    pub fn parse<R: ListRecord>(
        params: &QueryParams,
        pagination: &PaginationConfig,
    ) -> Result<Self, ApiFailure> {
        let keyword = params
            .get(KEYWORD_PARAM)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty());

        let mut filters = Vec::new();
        for spec in R::FILTERS {
            if let Some(raw) = normalize_choice(params.get(spec.param)) {
                let canonical = spec
                    .values
                    .iter()
                    .copied()
                    .find(|value| value.eq_ignore_ascii_case(raw))
                    .ok_or_else(|| {
                        ApiFailure::invalid(format!(
                            "Invalid {} '{}', expected one of {}",
                            spec.param,
                            raw,
                            spec.values.join(", ")
                        ))
                    })?;
                filters.push((spec.param, canonical));
            }
        }

        let start_date = parse_date(params, RANGE_START_PARAM)?;
        let end_date = parse_date(params, RANGE_END_PARAM)?;
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(ApiFailure::invalid(format!(
                    "{} {} is after {} {}",
                    RANGE_START_PARAM, start, RANGE_END_PARAM, end
                )));
            }
        }

        let page = parse_number(params, PAGE_PARAM)?.unwrap_or(1).max(1);
        let page_size = pagination.clamp_page_size(
            parse_number(params, PAGE_SIZE_PARAM)?.unwrap_or(pagination.default_page_size),
        );

        Ok(Self {
            keyword,
            filters,
            start_date,
            end_date,
            page,
            page_size,
        })
    }

    /// All conditions combine with AND
    pub fn matches<R: ListRecord>(&self, record: &R) -> bool {
        if let Some(keyword) = &self.keyword {
            if !record.matches_keyword(keyword) {
                return false;
            }
        }

        let filters_match = self
            .filters
            .iter()
            .all(|(param, value)| record.filter_value(param) == Some(*value));
        if !filters_match {
            return false;
        }

        let date = record.timeline_date();
        if self.start_date.is_some_and(|start| date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| date > end) {
            return false;
        }
        true
    }

    /// Filter, order newest first, and cut the requested page
    ///
    /// A page past the end yields empty items with the real total.
    pub fn apply<R: ListRecord>(&self, records: &[R]) -> PageData<R> {
        let mut matched: Vec<&R> = records.iter().filter(|r| self.matches(*r)).collect();
        matched.sort_by(|a, b| {
            b.timeline_date()
                .cmp(&a.timeline_date())
                .then_with(|| a.id().cmp(b.id()))
        });

        let total = matched.len();
        let offset = self.page.saturating_sub(1).saturating_mul(self.page_size);
        let items = matched
            .into_iter()
            .skip(offset)
            .take(self.page_size)
            .cloned()
            .collect();

        PageData {
            items,
            total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Enterprise, EnterpriseStatus, LabTest};
    use crate::mock::Fixtures;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_all_marker_and_blank_are_unfiltered() {
        let query = ListQuery::parse::<Enterprise>(
            &params(&[("status", "all"), ("type", "  "), ("keyword", "")]),
            &PaginationConfig::default(),
        )
        .expect("parse");

        assert!(query.filters.is_empty());
        assert_eq!(query.keyword, None);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 10);
    }

    #[test]
    fn test_filter_values_are_canonicalized() {
        let query = ListQuery::parse::<Enterprise>(
            &params(&[("status", "suspended")]),
            &PaginationConfig::default(),
        )
        .expect("parse");
        assert_eq!(query.filters, vec![("status", "SUSPENDED")]);
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        let pagination = PaginationConfig::default();
        for bad in [
            params(&[("status", "CLOSED")]),
            params(&[("startDate", "2024/01/01")]),
            params(&[("startDate", "2024-03-01"), ("endDate", "2024-02-01")]),
            params(&[("page", "two")]),
        ] {
            let err = ListQuery::parse::<Enterprise>(&bad, &pagination).expect_err("rejected");
            assert_eq!(err.code, crate::errors::ErrorCode::InvalidParams);
        }
    }

    #[test]
    fn test_page_size_is_clamped() {
        let pagination = PaginationConfig::default();
        let query =
            ListQuery::parse::<LabTest>(&params(&[("pageSize", "5000"), ("page", "0")]), &pagination)
                .expect("parse");
        assert_eq!(query.page_size, 100);
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_apply_filters_pages_and_orders() {
        let fixtures = Fixtures::generate(7, 60);
        let query = ListQuery::parse::<Enterprise>(
            &params(&[("status", "ACTIVE"), ("pageSize", "5")]),
            &PaginationConfig::default(),
        )
        .expect("parse");

        let page = query.apply(&fixtures.enterprises);
        let expected = fixtures
            .enterprises
            .iter()
            .filter(|e| e.status == EnterpriseStatus::Active)
            .count();

        assert_eq!(page.total, expected);
        assert!(page.items.len() <= 5);
        assert!(page.items.iter().all(|e| e.status == EnterpriseStatus::Active));
        assert!(page
            .items
            .windows(2)
            .all(|w| w[0].registered_at >= w[1].registered_at));
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let fixtures = Fixtures::generate(7, 40);
        let day = fixtures.enterprises[0].registered_at.format(DATE_FORMAT).to_string();
        let query = ListQuery::parse::<Enterprise>(
            &params(&[("startDate", day.as_str()), ("endDate", day.as_str()), ("pageSize", "100")]),
            &PaginationConfig::default(),
        )
        .expect("parse");

        let page = query.apply(&fixtures.enterprises);
        assert!(page.total >= 1);
        assert!(page
            .items
            .iter()
            .all(|e| e.registered_at.format(DATE_FORMAT).to_string() == day));
    }

    #[test]
    fn test_page_past_end_keeps_total() {
        let fixtures = Fixtures::generate(7, 12);
        let query = ListQuery::parse::<Enterprise>(
            &params(&[("page", "9")]),
            &PaginationConfig::default(),
        )
        .expect("parse");
        let page = query.apply(&fixtures.enterprises);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 12);
        assert_eq!(page.page, 9);
    }
}
