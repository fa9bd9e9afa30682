// Copyright 2026 the PrecinctTally authors.
// This file is part of PrecinctTally.
// PrecinctTally is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// PrecinctTally is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with PrecinctTally.  If not, see <https://www.gnu.org/licenses/>.

//! Getting the archive bytes. No retries are done here; that is up to the caller.

use std::io::Read;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use log::{debug, info, warn};
use reqwest::header::CONTENT_TYPE;
use crate::config::FetchConfig;
use crate::errors::FetchError;

/// Something that can produce the bytes of an archive given its URL.
pub trait ArchiveFetcher {
    fn fetch(&self,url:&str) -> Result<Vec<u8>,FetchError>;
}

/// A flag the caller can set from any thread to abandon a download in progress.
#[derive(Debug,Clone,Default)]
pub struct CancellationToken {
    cancelled : Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn cancel(&self) { self.cancelled.store(true,Ordering::SeqCst); }
    pub fn is_cancelled(&self) -> bool { self.cancelled.load(Ordering::SeqCst) }
}

/// Download with a blocking reqwest client.
pub struct HttpFetcher {
    client : reqwest::blocking::Client,
    config : FetchConfig,
    cancel : CancellationToken,
}

const READ_CHUNK : usize = 64*1024;

impl HttpFetcher {
    pub fn new(config:FetchConfig) -> Result<Self,reqwest::Error> {
        Self::with_cancellation(config,CancellationToken::default())
    }

    pub fn with_cancellation(config:FetchConfig,cancel:CancellationToken) -> Result<Self,reqwest::Error> {
        let client = reqwest::blocking::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::with_client(client,config,cancel))
    }

    /// Use an already built client, e.g. one with particular proxy settings.
    /// The client's own timeout applies, not `config.timeout_secs`.
    pub fn with_client(client:reqwest::blocking::Client,config:FetchConfig,cancel:CancellationToken) -> Self {
        HttpFetcher{ client, config, cancel }
    }

    pub fn cancellation_token(&self) -> CancellationToken { self.cancel.clone() }

    fn check_content_type(&self,url:&str,response:&reqwest::blocking::Response) -> Result<(),FetchError> {
        let content_type = match response.headers().get(CONTENT_TYPE).and_then(|v|v.to_str().ok()) {
            Some(content_type) => content_type,
            None => return Ok(()), // nothing to check against.
        };
        if self.config.is_expected_content_type(content_type) { return Ok(()) }
        warn!("Downloading {} gave unexpected content type {}",url,content_type);
        if self.config.reject_unexpected_content_type {
            Err(FetchError::UnexpectedContentType{ url: url.to_string(), content_type: content_type.to_string() })
        } else { Ok(()) }
    }
}

impl ArchiveFetcher for HttpFetcher {
    fn fetch(&self,url:&str) -> Result<Vec<u8>,FetchError> {
        if self.cancel.is_cancelled() { return Err(FetchError::Cancelled) }
        info!("Downloading {} with reqwest",url);
        let mut response = self.client.get(url).send().map_err(|source|FetchError::Transport{ url: url.to_string(), source })?;
        let status = response.status();
        if !status.is_success() { return Err(FetchError::Status{ url: url.to_string(), status }) }
        self.check_content_type(url,&response)?;
        let mut contents : Vec<u8> = Vec::with_capacity(response.content_length().unwrap_or(0) as usize);
        let mut buffer = vec![0u8;READ_CHUNK];
        loop {
            if self.cancel.is_cancelled() { return Err(FetchError::Cancelled) }
            let n = response.read(&mut buffer)?;
            if n==0 { break; }
            contents.extend_from_slice(&buffer[..n]);
        }
        debug!("Downloaded {} bytes from {}",contents.len(),url);
        Ok(contents)
    }
}

/// An archive already in memory, ignoring the URL. Useful for archives
/// downloaded by other means.
pub struct InMemoryFetcher {
    pub contents : Vec<u8>,
}

impl ArchiveFetcher for InMemoryFetcher {
    fn fetch(&self,_url:&str) -> Result<Vec<u8>,FetchError> { Ok(self.contents.clone()) }
}
