//! Money values are exact decimals in the database and numbers in JSON.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer, ser::Error as _};

/// Serialize `value` as a JSON number.
///
/// The decimal text is parsed as `f64`, which rounds to the nearest float, so a
/// value accepted by [validate_decimal](crate::validation::validate_decimal)
/// prints back with exactly the same digits.
pub fn serialize_as_number<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let number = f64::from_str(&value.to_string()).map_err(S::Error::custom)?;

    number.serialize(serializer)
}
