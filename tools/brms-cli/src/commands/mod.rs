//! CLI command implementations.

pub mod checkout;
pub mod config;
pub mod quote;
pub mod session;

use brms_auth::Role;
use brms_commerce::checkout::{DeliveryMethod, PaymentMethod};
use clap::{Args, Subcommand, ValueEnum};

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Cart file (TOML or JSON).
    #[arg(long)]
    pub cart: String,

    /// Delivery method: delivery_1hour, dine_in or take_away.
    #[arg(short, long, default_value = "delivery_1hour")]
    pub delivery: DeliveryMethod,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Cart file (TOML or JSON).
    #[arg(long)]
    pub cart: String,

    /// Delivery method: delivery_1hour, dine_in or take_away.
    #[arg(short, long)]
    pub delivery: DeliveryMethod,

    /// Street address (delivery_1hour).
    #[arg(long)]
    pub address: Option<String>,

    /// District (delivery_1hour).
    #[arg(long)]
    pub district: Option<String>,

    /// Landmark or sector (delivery_1hour).
    #[arg(long)]
    pub location: Option<String>,

    /// Table number (dine_in).
    #[arg(long)]
    pub table: Option<String>,

    /// Note for the kitchen or courier.
    #[arg(long)]
    pub notes: Option<String>,

    /// Billing name. Defaults to the logged-in user.
    #[arg(long)]
    pub name: Option<String>,

    /// Billing email. Defaults to the logged-in user.
    #[arg(long)]
    pub email: Option<String>,

    /// Billing phone. Defaults to the logged-in user.
    #[arg(long)]
    pub phone: Option<String>,

    /// Payment method: mobile_money, card or cash.
    #[arg(short, long, default_value = "cash")]
    pub payment: PaymentMethod,

    /// Mobile money number. Defaults to the billing phone.
    #[arg(long)]
    pub momo_phone: Option<String>,

    /// Card holder name.
    #[arg(long)]
    pub card_holder: Option<String>,

    /// Card number.
    #[arg(long)]
    pub card_number: Option<String>,

    /// Card expiry (MM/YY).
    #[arg(long)]
    pub card_expiry: Option<String>,

    /// Card CVV.
    #[arg(long)]
    pub card_cvv: Option<String>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the session command.
#[derive(Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Record a logged-in user.
    Login {
        /// User id issued by the backend.
        #[arg(long)]
        id: String,

        /// Role: customer, waiter, manager or admin.
        #[arg(long, default_value = "customer")]
        role: Role,

        /// Display name.
        #[arg(long)]
        name: String,

        /// Email address.
        #[arg(long)]
        email: String,

        /// Phone number.
        #[arg(long)]
        phone: Option<String>,
    },
    /// End the current session.
    Logout,
    /// Show the current session.
    Show,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,

        /// File format to write.
        #[arg(long, value_enum, default_value_t = ConfigFormat::Toml)]
        format: ConfigFormat,
    },
}

/// Config file formats.
#[derive(Clone, Copy, ValueEnum)]
pub enum ConfigFormat {
    /// brms.toml
    Toml,
    /// brms.json
    Json,
}
