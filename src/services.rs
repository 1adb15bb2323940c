pub mod ingest_pipeline;
