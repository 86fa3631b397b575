use crate::shared::list_controller::EndpointPolicy;

pub const REFRESH_KEY: &str = "damagedGoods";

pub fn endpoint_policy() -> EndpointPolicy {
    EndpointPolicy::plain("/api/damaged-goods", "damagedGoods")
}
