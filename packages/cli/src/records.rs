//! Record shapes used by the demo.

use serde::{Deserialize, Serialize};
use serde_json::Number;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "addressCity")]
    pub city: String,
    #[serde(rename = "addressState")]
    pub state: String,
    #[serde(rename = "addressCountry")]
    pub country: String,
    #[serde(rename = "addressPincode")]
    pub pincode: Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "userName")]
    pub name: String,
    #[serde(rename = "userAge")]
    pub age: Number,
    #[serde(rename = "userContact")]
    pub contact: String,
    #[serde(rename = "userCompany")]
    pub company: String,
    #[serde(rename = "userAddress")]
    pub address: Address,
}

impl User {
    pub fn new(
        name: &str,
        age: u64,
        contact: &str,
        company: &str,
        (city, state, country, pincode): (&str, &str, &str, u64),
    ) -> Self {
        User {
            name: name.to_string(),
            age: Number::from(age),
            contact: contact.to_string(),
            company: company.to_string(),
            address: Address {
                city: city.to_string(),
                state: state.to_string(),
                country: country.to_string(),
                pincode: Number::from(pincode),
            },
        }
    }
}

/// The demo data set.
pub fn employees() -> Vec<User> {
    vec![
        User::new("John", 23, "2343343", "Google", ("New York", "NY", "USA", 10001)),
        User::new("Alice", 30, "1234567", "Microsoft", ("Redmond", "WA", "USA", 98052)),
        User::new("Bob", 28, "9876543", "Amazon", ("Seattle", "WA", "USA", 98101)),
        User::new("Charlie", 35, "4567890", "Apple", ("Cupertino", "CA", "USA", 95014)),
        User::new("Diana", 29, "3456789", "Facebook", ("Menlo Park", "CA", "USA", 94025)),
        User::new("Eve", 32, "7890123", "Tesla", ("Palo Alto", "CA", "USA", 94301)),
    ]
}
