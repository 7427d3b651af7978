// Amount entry state and conversions for the transfer screen.

pub mod amount_state;
pub mod currency;
pub mod transfer_amount;
