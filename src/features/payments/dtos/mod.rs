mod payment_dto;

pub use payment_dto::{Checkout, ClientTokenDto, PaymentRequestDto, PaymentResultDto};
