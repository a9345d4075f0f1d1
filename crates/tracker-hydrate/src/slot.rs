//! The two hydration slots

use serde::{Deserialize, Serialize};

/// Which piece of render data a slot carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HydrationSlot {
    /// Data fetched by the matched page's loader
    InitialData,
    /// Session user fetched for the navigation bar
    UserData,
}

impl HydrationSlot {
    pub const ALL: [HydrationSlot; 2] = [Self::InitialData, Self::UserData];

    /// Name of the browser global that carries this slot
    #[inline]
    #[must_use]
    pub fn global_name(self) -> &'static str {
        match self {
            Self::InitialData => "__INITIAL_DATA__",
            Self::UserData => "__USER_DATA__",
        }
    }
}

impl std::fmt::Display for HydrationSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.global_name())
    }
}
