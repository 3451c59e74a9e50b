use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

/// A single cell of a dataset.
///
/// Raw cells that parse as finite numbers become [`Value::Numeric`]; anything
/// else, including every discretization bucket, is [`Value::Categorical`].
#[derive(Debug, Clone)]
pub enum Value {
    Numeric(f64),
    Categorical(String),
}

impl Value {
    /// Parses a raw cell. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<f64>() {
            Ok(number) if number.is_finite() => Value::Numeric(number),
            _ => Value::Categorical(raw.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Numeric(number) => Some(*number),
            Value::Categorical(_) => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Numeric(_))
    }
}

impl From<&str> for Value {
    fn from(label: &str) -> Self {
        Value::Categorical(label.to_string())
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Value::Numeric(number)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Numeric(number) => write!(f, "{}", number),
            Value::Categorical(label) => write!(f, "{}", label),
        }
    }
}

// Numbers compare by `total_cmp`, so equality matches bit equality and the
// `Hash` impl below stays consistent with `Eq`.
impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Numeric(a), Value::Numeric(b)) => a.total_cmp(b),
            (Value::Numeric(_), Value::Categorical(_)) => Ordering::Less,
            (Value::Categorical(_), Value::Numeric(_)) => Ordering::Greater,
            (Value::Categorical(a), Value::Categorical(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Numeric(number) => {
                0u8.hash(state);
                number.to_bits().hash(state);
            }
            Value::Categorical(label) => {
                1u8.hash(state);
                label.hash(state);
            }
        }
    }
}
