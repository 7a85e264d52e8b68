//! Cleaning of the non-amenity regression covariates.
//!
//! Prices arrive as currency text (`$1,250.00`), counts may be missing, and
//! square footage is mostly missing, so it is zero-filled and paired with an
//! explicit missingness indicator.

use listings_io::{DataColumn, ListingTable};

use crate::error::{FeatureError, Result};

pub const PRICE: &str = "price";
pub const PROPERTY_TYPE: &str = "property_type";
pub const ROOM_TYPE: &str = "room_type";
pub const BEDROOMS: &str = "bedrooms";
pub const BEDS: &str = "beds";
pub const BATHROOMS: &str = "bathrooms";
pub const SQUARE_FEET: &str = "square_feet";
pub const SQUARE_FEET_MISSING: &str = "square_feet_missing";

/// Parse a currency string such as `$1,250.00`.
///
/// # Examples
/// ```
/// use listings_features::parse_price;
/// assert_eq!(parse_price("$1,250.00"), Some(1250.0));
/// assert_eq!(parse_price("n/a"), None);
/// ```
pub fn parse_price(raw: &str) -> Option<f64> {
    let digits: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok().filter(|p: &f64| p.is_finite())
}

/// Cleaned covariates, row-aligned with the listing table
#[derive(Debug, Clone, PartialEq)]
pub struct Covariates {
    /// Nightly price, NaN when missing or unparseable
    pub price: Vec<f64>,
    pub property_type: Vec<Option<String>>,
    pub room_type: Vec<Option<String>>,
    pub bedrooms: Vec<f64>,
    pub beds: Vec<f64>,
    pub bathrooms: Vec<f64>,
    /// Square footage with missing values replaced by 0.0
    pub square_feet: Vec<f64>,
    pub square_feet_missing: Vec<bool>,
}

impl Covariates {
    /// Extract and clean every covariate column from the table.
    pub fn from_table(table: &ListingTable) -> Result<Self> {
        let raw_square_feet = numeric(table, SQUARE_FEET)?;
        let square_feet_missing: Vec<bool> = raw_square_feet.iter().map(|x| x.is_nan()).collect();
        let square_feet = raw_square_feet
            .into_iter()
            .map(|x| if x.is_nan() { 0.0 } else { x })
            .collect();

        Ok(Self {
            price: price(table)?,
            property_type: text(table, PROPERTY_TYPE)?,
            room_type: text(table, ROOM_TYPE)?,
            bedrooms: numeric(table, BEDROOMS)?,
            beds: numeric(table, BEDS)?,
            bathrooms: numeric(table, BATHROOMS)?,
            square_feet,
            square_feet_missing,
        })
    }

    pub fn len(&self) -> usize {
        self.price.len()
    }

    pub fn is_empty(&self) -> bool {
        self.price.is_empty()
    }

    /// Append the cleaned columns to the table under their `clean_` names,
    /// plus the square-footage missingness indicator. Nothing is written if
    /// any of those names is already taken.
    pub fn append_to(self, table: &mut ListingTable) -> Result<()> {
        table.add_columns([
            (clean_name(PRICE), DataColumn::Float64(self.price)),
            (clean_name(BEDROOMS), DataColumn::Float64(self.bedrooms)),
            (clean_name(BEDS), DataColumn::Float64(self.beds)),
            (clean_name(BATHROOMS), DataColumn::Float64(self.bathrooms)),
            (clean_name(SQUARE_FEET), DataColumn::Float64(self.square_feet)),
            (
                SQUARE_FEET_MISSING.to_string(),
                DataColumn::from_bools(self.square_feet_missing),
            ),
        ])?;
        Ok(())
    }
}

/// Name under which a cleaned numeric covariate is stored
pub fn clean_name(column: &str) -> String {
    format!("clean_{}", column)
}

fn require<'a>(table: &'a ListingTable, name: &str) -> Result<&'a DataColumn> {
    table
        .column(name)
        .ok_or_else(|| FeatureError::UnknownColumn(name.to_string()))
}

fn price(table: &ListingTable) -> Result<Vec<f64>> {
    Ok(match require(table, PRICE)? {
        DataColumn::Text(values) => values
            .iter()
            .map(|v| v.as_deref().and_then(parse_price).unwrap_or(f64::NAN))
            .collect(),
        other => to_f64(other),
    })
}

fn numeric(table: &ListingTable, name: &str) -> Result<Vec<f64>> {
    Ok(match require(table, name)? {
        DataColumn::Text(values) => values
            .iter()
            .map(|v| {
                v.as_deref()
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(f64::NAN)
            })
            .collect(),
        other => to_f64(other),
    })
}

fn to_f64(column: &DataColumn) -> Vec<f64> {
    match column {
        DataColumn::Bool(values) => values
            .iter()
            .map(|v| v.map(|b| if b { 1.0 } else { 0.0 }).unwrap_or(f64::NAN))
            .collect(),
        other => other
            .to_f64()
            .unwrap_or_else(|| vec![f64::NAN; other.len()]),
    }
}

fn text(table: &ListingTable, name: &str) -> Result<Vec<Option<String>>> {
    let column = require(table, name)?;
    Ok((0..column.len()).map(|row| column.cell(row)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use listings_io::IoError;

    fn table() -> ListingTable {
        let mut table = ListingTable::default();
        let text = |values: &[Option<&str>]| {
            DataColumn::Text(values.iter().map(|v| v.map(|s| s.to_string())).collect())
        };
        table
            .add_column(PRICE, text(&[Some("$120.00"), Some("$1,250.00"), None]))
            .unwrap();
        table
            .add_column(PROPERTY_TYPE, text(&[Some("Apartment"), Some("House"), Some("Loft")]))
            .unwrap();
        table
            .add_column(ROOM_TYPE, text(&[Some("Entire home/apt"), None, Some("Private room")]))
            .unwrap();
        table
            .add_column(BEDROOMS, DataColumn::Int64(vec![Some(1), Some(4), None]))
            .unwrap();
        table
            .add_column(BEDS, DataColumn::Int64(vec![Some(1), Some(5), Some(1)]))
            .unwrap();
        table
            .add_column(BATHROOMS, DataColumn::Float64(vec![1.0, 2.5, f64::NAN]))
            .unwrap();
        table
            .add_column(SQUARE_FEET, DataColumn::Float64(vec![f64::NAN, 1800.0, f64::NAN]))
            .unwrap();
        table
    }

    #[test]
    fn test_price_parsing() {
        assert_eq!(parse_price("$85.00"), Some(85.0));
        assert_eq!(parse_price(" $1,000 "), Some(1000.0));
        assert_eq!(parse_price("$"), None);
        assert_eq!(parse_price("free"), None);
    }

    #[test]
    fn test_cleans_every_column() {
        let cov = Covariates::from_table(&table()).unwrap();

        assert_eq!(cov.len(), 3);
        assert_eq!(cov.price[..2], [120.0, 1250.0]);
        assert!(cov.price[2].is_nan());
        assert_eq!(cov.room_type[1], None);
        assert!(cov.bedrooms[2].is_nan());
        assert_eq!(cov.bathrooms[1], 2.5);
        assert_eq!(cov.square_feet, vec![0.0, 1800.0, 0.0]);
        assert_eq!(cov.square_feet_missing, vec![true, false, true]);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let mut t = ListingTable::default();
        t.add_column(PRICE, DataColumn::Float64(vec![1.0])).unwrap();
        assert!(matches!(
            Covariates::from_table(&t),
            Err(FeatureError::UnknownColumn(name)) if name == SQUARE_FEET
        ));
    }

    #[test]
    fn test_append_adds_clean_columns() {
        let mut t = table();
        Covariates::from_table(&t).unwrap().append_to(&mut t).unwrap();
        assert_eq!(
            t.column(SQUARE_FEET_MISSING),
            Some(&DataColumn::from_bools(vec![true, false, true]))
        );
        assert!(t.has_column("clean_price"));
    }

    #[test]
    fn test_append_writes_nothing_on_name_clash() {
        let mut t = table();
        t.add_column(clean_name(BEDS), DataColumn::Float64(vec![0.0; 3]))
            .unwrap();
        let before: Vec<String> = t.column_names().iter().map(|s| s.to_string()).collect();

        let err = Covariates::from_table(&t).unwrap().append_to(&mut t).unwrap_err();
        assert!(matches!(
            err,
            FeatureError::Io(IoError::DuplicateColumn(name)) if name == "clean_beds"
        ));
        assert_eq!(t.column_names(), before);
        assert!(!t.has_column("clean_price"));
    }
}
