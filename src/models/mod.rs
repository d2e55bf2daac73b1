pub mod user;
pub mod subscription;
pub mod price;
pub mod alert_decision;

pub use user::User;
pub use subscription::{EnabledSubscription, Subscription};
pub use price::{PricePoint, PriceSeries};
pub use alert_decision::AlertDecision;
