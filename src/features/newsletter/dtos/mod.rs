mod subscriber_dto;

pub use subscriber_dto::{CreateSubscriberDto, SubscriberResponseDto};
