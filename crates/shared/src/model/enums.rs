use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Status-like enums are stored as TEXT and travel as snake_case strings.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
        $(aliases { $($alias:literal => $target:ident),+ $(,)? })?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_lowercase();
                match normalized.as_str() {
                    $($text => Ok($name::$variant),)+
                    $($($alias => Ok($name::$target),)+)?
                    _ => Err(UnknownVariant {
                        kind: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = UnknownVariant;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

text_enum! {
    Role {
        User => "user",
        Vendor => "vendor",
        Admin => "admin",
    }
    aliases { "customer" => User }
}

text_enum! {
    VendorStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        Suspended => "suspended",
    }
}

text_enum! {
    ProductStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

text_enum! {
    OrderStatus {
        Pending => "pending",
        Confirmed => "confirmed",
        Shipped => "shipped",
        Delivered => "delivered",
        Cancelled => "cancelled",
    }
}

text_enum! {
    PaymentStatus {
        Pending => "pending",
        Completed => "completed",
        Failed => "failed",
        Refunded => "refunded",
    }
}

text_enum! {
    RefundStatus {
        Requested => "requested",
        Approved => "approved",
        Rejected => "rejected",
        Completed => "completed",
    }
}

impl RefundStatus {
    /// Requested refunds are decided once; approved ones are then paid out.
    pub fn can_move_to(self, next: RefundStatus) -> bool {
        matches!(
            (self, next),
            (RefundStatus::Requested, RefundStatus::Approved)
                | (RefundStatus::Requested, RefundStatus::Rejected)
                | (RefundStatus::Approved, RefundStatus::Completed)
        )
    }
}

text_enum! {
    PaymentMethod {
        CreditCard => "credit_card",
        DebitCard => "debit_card",
        Upi => "upi",
        NetBanking => "net_banking",
        Wallet => "wallet",
    }
}

text_enum! {
    NotificationKind {
        System => "system",
        Message => "message",
        BestSeller => "best_seller",
        NewVendor => "new_vendor",
        NewOrder => "new_order",
        NewCategory => "new_category",
    }
}

text_enum! {
    /// Whose inbox a notification lands in.
    Audience {
        Vendor => "vendor",
        Admin => "admin",
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl Default for NotificationKind {
    fn default() -> Self {
        NotificationKind::Message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" Vendor ".parse::<Role>(), Ok(Role::Vendor));
        assert_eq!("customer".parse::<Role>(), Ok(Role::User));
    }

    #[test]
    fn unknown_values_are_rejected() {
        let err = "shipped".parse::<ProductStatus>().unwrap_err();
        assert_eq!(err.kind, "ProductStatus");
        assert_eq!(err.value, "shipped");
    }

    #[test]
    fn refund_transitions() {
        use RefundStatus::*;
        assert!(Requested.can_move_to(Approved));
        assert!(Requested.can_move_to(Rejected));
        assert!(Approved.can_move_to(Completed));
        assert!(!Requested.can_move_to(Completed));
        assert!(!Rejected.can_move_to(Approved));
        assert!(!Completed.can_move_to(Requested));
    }

    #[test]
    fn serde_and_text_forms_agree() {
        for method in PaymentMethod::ALL {
            let json = serde_json::to_value(method).unwrap();
            assert_eq!(json, serde_json::Value::String(method.as_str().to_string()));
        }
        for kind in NotificationKind::ALL {
            assert_eq!(kind.as_str().parse::<NotificationKind>(), Ok(*kind));
        }
    }
}
