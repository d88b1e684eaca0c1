//! Static role-to-operation policy table.

use std::fmt;

use pvz_entity::user::UserRole;

/// An operation subject to an access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Register a new pick-up point.
    CreatePoint,
    /// List pick-up points with their receptions and products.
    ListPoints,
    /// Open a reception at a point.
    OpenReception,
    /// Close the open reception at a point.
    CloseReception,
    /// Add a product to the open reception.
    AddProduct,
    /// Remove the most recently added product from the open reception.
    RemoveLastProduct,
    /// End the caller's own session.
    Logout,
}

impl Operation {
    /// All operations, in declaration order.
    pub const ALL: [Operation; 7] = [
        Self::CreatePoint,
        Self::ListPoints,
        Self::OpenReception,
        Self::CloseReception,
        Self::AddProduct,
        Self::RemoveLastProduct,
        Self::Logout,
    ];

    /// Stable snake_case name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatePoint => "create_point",
            Self::ListPoints => "list_points",
            Self::OpenReception => "open_reception",
            Self::CloseReception => "close_reception",
            Self::AddProduct => "add_product",
            Self::RemoveLastProduct => "remove_last_product",
            Self::Logout => "logout",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `role` may perform `operation`.
///
/// Pure and total: every (role, operation) pair has an answer.
pub fn allowed(role: UserRole, operation: Operation) -> bool {
    use Operation::*;

    match (role, operation) {
        (_, ListPoints | Logout) => true,
        (UserRole::Moderator, CreatePoint) => true,
        (
            UserRole::Employee,
            OpenReception | CloseReception | AddProduct | RemoveLastProduct,
        ) => true,
        _ => false,
    }
}
