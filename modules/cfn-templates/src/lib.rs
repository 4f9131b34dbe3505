pub mod alerting;
pub mod error;
pub mod lambda_bucket;
pub mod management_role;
pub mod output;
pub mod template;

pub use alerting::alerting_template;
pub use error::{Result, TemplateError};
pub use lambda_bucket::lambda_bucket_template;
pub use management_role::management_role_template;
pub use output::{OutputArgs, OutputFormat};
pub use template::{join, ref_to, Parameter, Resource, Template};
