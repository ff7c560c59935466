//! End-to-end scenarios through the HTTP API
