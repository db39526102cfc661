mod recognizer;

pub use recognizer::IRecognizer;
