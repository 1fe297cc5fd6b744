use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One transaction row as it comes from the source table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub order_date: NaiveDate,
    pub sales: f64,
    pub profit: f64,
    pub discount: f64,
    pub quantity: i64,
    pub state: String,
    pub region: String,
    pub category: String,
    pub sub_category: String,
    pub segment: String,
    pub ship_mode: String,
    pub customer_name: String,
}

/// (year, month) period key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthYear {
    pub year: i32,
    pub month: u32,
}

impl std::fmt::Display for MonthYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Calendar fields derived from the order date.
///
/// Always built through [`OrderPeriod::from_date`], so `month_number` and
/// `month_name` name the same month and `year` matches the date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPeriod {
    pub year: i32,
    /// 1..=12
    pub month_number: u32,
    /// English month name, e.g. "January"
    pub month_name: String,
    pub month_year: MonthYear,
}

impl OrderPeriod {
    pub fn from_date(date: NaiveDate) -> Self {
        let year = date.year();
        let month_number = date.month();
        Self {
            year,
            month_number,
            month_name: date.format("%B").to_string(),
            month_year: MonthYear {
                year,
                month: month_number,
            },
        }
    }
}

/// A loaded record: the source line plus its cached period fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(flatten)]
    pub line: OrderLine,
    pub period: OrderPeriod,
}

impl TransactionRecord {
    pub fn new(line: OrderLine) -> Self {
        let period = OrderPeriod::from_date(line.order_date);
        Self { line, period }
    }
}

impl From<OrderLine> for TransactionRecord {
    fn from(line: OrderLine) -> Self {
        Self::new(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_matches_date() {
        let date = NaiveDate::from_ymd_opt(2016, 11, 8).unwrap();
        let period = OrderPeriod::from_date(date);

        assert_eq!(period.year, 2016);
        assert_eq!(period.month_number, 11);
        assert_eq!(period.month_name, "November");
        assert_eq!(period.month_year.to_string(), "2016-11");
    }

    #[test]
    fn test_month_names_follow_month_numbers() {
        let names = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        for (i, name) in names.iter().enumerate() {
            let date = NaiveDate::from_ymd_opt(2015, i as u32 + 1, 1).unwrap();
            let period = OrderPeriod::from_date(date);
            assert_eq!(period.month_number, i as u32 + 1);
            assert_eq!(&period.month_name, name);
        }
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = TransactionRecord::new(OrderLine {
            order_date: NaiveDate::from_ymd_opt(2017, 3, 2).unwrap(),
            sales: 10.5,
            profit: 2.0,
            discount: 0.2,
            quantity: 3,
            state: "Texas".into(),
            region: "Central".into(),
            category: "Furniture".into(),
            sub_category: "Chairs".into(),
            segment: "Consumer".into(),
            ship_mode: "Second Class".into(),
            customer_name: "Ann Chong".into(),
        });

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["state"], "Texas");
        assert_eq!(json["order_date"], "2017-03-02");
        assert_eq!(json["period"]["month_name"], "March");
    }
}
