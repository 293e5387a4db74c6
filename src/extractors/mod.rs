pub mod ytdlp;

pub use ytdlp::YtDlpSource;
