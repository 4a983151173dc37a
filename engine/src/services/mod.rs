// gRPC surface of the engine. Generated code comes from proto/analysis.proto via build.rs.
pub mod generated {
    tonic::include_proto!("analysis");
}

pub mod analysis_service;

pub use generated::analysis_engine_client::AnalysisEngineClient;
pub use generated::analysis_engine_server::{AnalysisEngine, AnalysisEngineServer};
pub use generated::{
    Candle as ProtoCandle, HealthRequest, HealthResponse, RegimeResponse, SentimentRequest,
    SentimentResponse, SentimentScores as ProtoSentimentScores, SeriesRequest, TechnicalsResponse,
};
