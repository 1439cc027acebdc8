pub mod http_client;
pub mod pacer;
pub mod report_output_adapter;
pub mod user_agent;

pub use http_client::ReqwestHttp;
pub use pacer::{NoDelayPacer, RandomDelayPacer};
pub use report_output_adapter::FileReportOutputAdapter;
pub use user_agent::{FixedUserAgent, RotatingUserAgents};
