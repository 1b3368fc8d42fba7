use planka_api::RequestConfig;

#[derive(Clone)]
pub struct Context {
	pub config: RequestConfig,
}

impl Context {
	pub const fn new(config: RequestConfig) -> Self {
		Self { config }
	}
}
