//! 계산 결과를 PNG/GIF/CSV 파일로 내보내는 렌더링 계층.

pub mod chart;
pub mod output;

pub use chart::*;
pub use output::*;

/// 렌더링/파일 출력 오류.
#[derive(Debug)]
pub enum RenderError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 이미지 인코딩 오류
    Image(image::ImageError),
    /// CSV 기록 오류
    Csv(csv::Error),
    /// 그릴 데이터가 없음
    EmptySeries,
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Io(e) => write!(f, "file error: {e}"),
            RenderError::Image(e) => write!(f, "image encoding error: {e}"),
            RenderError::Csv(e) => write!(f, "csv error: {e}"),
            RenderError::EmptySeries => write!(f, "nothing to draw: series has no finite points"),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<std::io::Error> for RenderError {
    fn from(value: std::io::Error) -> Self {
        RenderError::Io(value)
    }
}

impl From<image::ImageError> for RenderError {
    fn from(value: image::ImageError) -> Self {
        RenderError::Image(value)
    }
}

impl From<csv::Error> for RenderError {
    fn from(value: csv::Error) -> Self {
        RenderError::Csv(value)
    }
}
