mod aggregation;
mod errors;
mod files;
mod pipelines;
