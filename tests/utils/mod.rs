//! Shared fixtures for the integration tests
#![allow(dead_code)]

use chrono::NaiveDate;
use rowmap::Record;

/// Route log output through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct Address {
    #[record(name = "City")]
    pub city: String,
    #[record(name = "Street")]
    pub street: String,
    #[record(name = "Zip")]
    pub zip: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct Contact {
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct Person {
    #[record(name = "ID")]
    pub id: i64,
    #[record(name = "myName")]
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    #[record(flatten, name = "Address")]
    pub address: Address,
    #[record(flatten)]
    pub contact: Option<Contact>,
    /// Stored as one map entry, not flattened
    pub previous_address: Option<Address>,
    #[record(skip)]
    pub loaded: bool,
}

/// A fully populated person
pub fn sample_person() -> Person {
    Person {
        id: 17,
        name: "Karen Blixen".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1885, 4, 17),
        tags: vec!["author".to_string(), "farmer".to_string()],
        address: Address {
            city: "Rungsted".to_string(),
            street: "Rungsted Strandvej 111".to_string(),
            zip: Some("2960".to_string()),
        },
        contact: Some(Contact {
            email: "karen@example.com".to_string(),
            phone: None,
        }),
        previous_address: Some(Address {
            city: "Nairobi".to_string(),
            ..Default::default()
        }),
        loaded: true,
    }
}

/// Three fields whose names differ only in case
#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct CaseVariants {
    #[record(name = "Name")]
    pub title_case: String,
    #[record(name = "NAME")]
    pub upper_case: String,
    #[record(name = "nickname")]
    pub nickname: String,
}
