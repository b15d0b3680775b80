// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! In-memory development server.
//!
//! Serves the artifacts of one build over HTTP/1.1. A path naming an
//! artifact returns it; any other path returns the HTML shell so that
//! client-side routing works (single-page-application fallback).

use crate::bundle::Artifact;
use crate::error::{BundleError, Result};
use crate::html::HTML_FILE_NAME;
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::header::{ALLOW, CONTENT_TYPE, HeaderValue};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use rustc_hash::FxHashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// A file ready to be sent
#[derive(Debug, Clone)]
struct ServedFile {
    content: Bytes,
    content_type: &'static str,
}

/// Immutable path → file table shared by all connections
#[derive(Debug, Default)]
pub(crate) struct FileMap {
    files: FxHashMap<String, ServedFile>,
}

impl FileMap {
    pub(crate) fn new(artifacts: Vec<Artifact>) -> Self {
        let files = artifacts
            .into_iter()
            .map(|artifact| {
                let file = ServedFile {
                    content_type: content_type(&artifact.file_name),
                    content: Bytes::from(artifact.content),
                };
                (artifact.file_name, file)
            })
            .collect();
        Self { files }
    }

    /// Answer a request for `path`
    pub(crate) fn respond(&self, method: &Method, path: &str) -> Response<Full<Bytes>> {
        if method != Method::GET {
            let mut response = text_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
            response.headers_mut().insert(ALLOW, HeaderValue::from_static("GET"));
            return response;
        }

        let name = path.strip_prefix('/').unwrap_or(path);
        match self.files.get(name).or_else(|| self.files.get(HTML_FILE_NAME)) {
            Some(file) => file_response(file),
            None => text_response(StatusCode::NOT_FOUND, "Not Found"),
        }
    }
}

/// A bound development server
#[derive(Debug)]
pub struct DevServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    files: Arc<FileMap>,
}

impl DevServer {
    /// Bind `addr`. Port 0 picks a free port; see [`DevServer::local_addr`].
    pub async fn bind(addr: SocketAddr, artifacts: Vec<Artifact>) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|err| BundleError::Server(format!("cannot bind {addr}: {err}")))?;
        let local_addr = listener
            .local_addr()
            .map_err(|err| BundleError::Server(err.to_string()))?;
        Ok(Self {
            listener,
            local_addr,
            files: Arc::new(FileMap::new(artifacts)),
        })
    }

    /// The address actually bound
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accept connections until the task is dropped, one task per connection
    pub async fn serve(self) -> Result<()> {
        info!(address = %self.local_addr, "dev server listening");
        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(err) => {
                    warn!(error = %err, "failed to accept connection");
                    continue;
                }
            };

            let files = Arc::clone(&self.files);
            tokio::spawn(async move {
                let service = service_fn(move |request: Request<Incoming>| {
                    let files = Arc::clone(&files);
                    async move {
                        let response = files.respond(request.method(), request.uri().path());
                        debug!(
                            method = %request.method(),
                            path = request.uri().path(),
                            status = response.status().as_u16(),
                            "request"
                        );
                        Ok::<_, Infallible>(response)
                    }
                });

                if let Err(err) = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await
                {
                    debug!(%peer, error = %err, "connection ended with error");
                }
            });
        }
    }
}

fn file_response(file: &ServedFile) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(file.content.clone()));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(file.content_type));
    response
}

fn text_response(status: StatusCode, text: &'static str) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(text.as_bytes())));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
    response
}

/// `Content-Type` for a served file name
pub fn content_type(file_name: &str) -> &'static str {
    match Path::new(file_name).extension().and_then(|ext| ext.to_str()) {
        Some("js" | "mjs" | "cjs") => "text/javascript; charset=utf-8",
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json" | "map") => "application/json",
        _ => "application/octet-stream",
    }
}
