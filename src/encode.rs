pub(crate) mod ffmpeg;
