/// Создаёт новый доменный тип поверх копируемого примитива.
#[macro_export]
macro_rules! newtype {
    ($tname:ident, $type:ty, $try_from:literal) => {
        #[derive(
            std::fmt::Debug,
            std::clone::Clone,
            std::marker::Copy,
            serde::Serialize,
            serde::Deserialize,
            std::cmp::PartialEq,
            std::cmp::Eq,
            std::cmp::PartialOrd,
            std::cmp::Ord,
            std::hash::Hash,
            std::default::Default,
        )]
        #[serde(try_from = $try_from)]
        pub struct $tname($type);

        impl $tname {
            pub fn new(value: $type) -> Self {
                Self(value)
            }
        }

        #[allow(clippy::from_over_into)]
        impl std::convert::Into<$type> for $tname {
            fn into(self) -> $type {
                self.0
            }
        }

        impl std::convert::From<$type> for $tname {
            fn from(value: $type) -> Self {
                $tname::new(value)
            }
        }

        impl std::str::FromStr for $tname {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok($tname::new(<$type>::from_str(s.trim())?))
            }
        }

        impl std::fmt::Display for $tname {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}
