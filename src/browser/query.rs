use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Rows per page offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "u32")]
pub enum PageLimit {
    #[default]
    Fifteen,
    Twenty,
    TwentyFive,
    Thirty,
    Fifty,
}

impl PageLimit {
    pub const ALL: [PageLimit; 5] = [
        PageLimit::Fifteen,
        PageLimit::Twenty,
        PageLimit::TwentyFive,
        PageLimit::Thirty,
        PageLimit::Fifty,
    ];

    pub fn get(self) -> u32 {
        match self {
            PageLimit::Fifteen => 15,
            PageLimit::Twenty => 20,
            PageLimit::TwentyFive => 25,
            PageLimit::Thirty => 30,
            PageLimit::Fifty => 50,
        }
    }
}

impl From<PageLimit> for u32 {
    fn from(limit: PageLimit) -> Self {
        limit.get()
    }
}

impl TryFrom<u32> for PageLimit {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        PageLimit::ALL
            .into_iter()
            .find(|limit| limit.get() == value)
            .ok_or_else(|| {
                Error::Validation(format!(
                    "Invalid page limit: {value}. Must be one of 15, 20, 25, 30, 50"
                ))
            })
    }
}

impl FromStr for PageLimit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|_| Error::Validation(format!("Invalid page limit: {s}")))?;
        PageLimit::try_from(value)
    }
}

impl fmt::Display for PageLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// The five search filters, in the order the backend documents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Title,
    Cuisine,
    Rating,
    TotalTime,
    Calories,
}

impl FilterField {
    pub const ALL: [FilterField; 5] = [
        FilterField::Title,
        FilterField::Cuisine,
        FilterField::Rating,
        FilterField::TotalTime,
        FilterField::Calories,
    ];

    /// Query parameter name understood by the search endpoint.
    pub fn wire_name(self) -> &'static str {
        match self {
            FilterField::Title => "title",
            FilterField::Cuisine => "cuisine",
            FilterField::Rating => "rating",
            FilterField::TotalTime => "total_time",
            FilterField::Calories => "calories",
        }
    }

    /// Example input shown next to the field.
    pub fn hint(self) -> &'static str {
        match self {
            FilterField::Title => "Search title...",
            FilterField::Cuisine => "e.g. Italian",
            FilterField::Rating => "e.g. >=4",
            FilterField::TotalTime => "e.g. <=30",
            FilterField::Calories => "e.g. <=500",
        }
    }
}

impl FromStr for FilterField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "title" => Ok(FilterField::Title),
            "cuisine" => Ok(FilterField::Cuisine),
            "rating" => Ok(FilterField::Rating),
            "total_time" | "time" => Ok(FilterField::TotalTime),
            "calories" => Ok(FilterField::Calories),
            other => Err(Error::Validation(format!(
                "Unknown filter: {other}. Must be title, cuisine, rating, total_time or calories"
            ))),
        }
    }
}

/// Raw filter input. Values may embed comparison operators (`>=4`, `<=30`);
/// they are opaque here and passed to the backend untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchFilters {
    pub title: String,
    pub cuisine: String,
    pub rating: String,
    pub total_time: String,
    pub calories: String,
}

impl SearchFilters {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Title => &self.title,
            FilterField::Cuisine => &self.cuisine,
            FilterField::Rating => &self.rating,
            FilterField::TotalTime => &self.total_time,
            FilterField::Calories => &self.calories,
        }
    }

    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let slot = match field {
            FilterField::Title => &mut self.title,
            FilterField::Cuisine => &mut self.cuisine,
            FilterField::Rating => &mut self.rating,
            FilterField::TotalTime => &mut self.total_time,
            FilterField::Calories => &mut self.calories,
        };
        *slot = value.into();
    }

    pub fn clear(&mut self) {
        *self = SearchFilters::default();
    }

    /// True when every field is blank after trimming.
    pub fn is_empty(&self) -> bool {
        FilterField::ALL
            .iter()
            .all(|field| self.get(*field).trim().is_empty())
    }

    /// Builds a search query carrying only the fields that hold a value.
    /// Returns `None` when no filter is set.
    pub fn to_query(&self) -> Option<SearchQuery> {
        let params: Vec<(FilterField, String)> = FilterField::ALL
            .iter()
            .filter(|field| !self.get(**field).trim().is_empty())
            .map(|field| (*field, self.get(*field).to_string()))
            .collect();

        if params.is_empty() {
            None
        } else {
            Some(SearchQuery { params })
        }
    }
}

/// Paginated listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowseQuery {
    pub page: u32,
    pub limit: PageLimit,
}

/// Filtered search request. Only present fields are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    params: Vec<(FilterField, String)>,
}

impl SearchQuery {
    pub fn params(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.params
            .iter()
            .map(|(field, value)| (field.wire_name(), value.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalQuery {
    Browse(BrowseQuery),
    Search(SearchQuery),
}
