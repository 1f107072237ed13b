pub mod long_polling;
pub mod original;
pub mod redirect_long_polling;
