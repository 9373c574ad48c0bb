use hyperbrowser_core::PollConfig;

use crate::job_service::{JobParams, JobRoute, JobService};
use crate::transport::HttpTransport;
use crate::types::{AgentTaskResponse, BrowserUseTaskParams, ComputerUseTaskParams};

pub(crate) const BROWSER_USE: JobRoute = JobRoute {
    path: "/task/browser-use",
    name: "browser-use task",
};

pub(crate) const CUA: JobRoute = JobRoute {
    path: "/task/cua",
    name: "CUA task",
};

pub(crate) const CLAUDE_COMPUTER_USE: JobRoute = JobRoute {
    path: "/task/claude-computer-use",
    name: "Claude computer use task",
};

pub(crate) const GEMINI_COMPUTER_USE: JobRoute = JobRoute {
    path: "/task/gemini-computer-use",
    name: "Gemini computer use task",
};

pub(crate) const HYPER_AGENT: JobRoute = JobRoute {
    path: "/task/hyper-agent",
    name: "HyperAgent task",
};

pub type BrowserUseService = JobService<BrowserUseTaskParams, AgentTaskResponse>;

/// Shared shape of the computer-use and HyperAgent task families.
pub type ComputerUseService = JobService<ComputerUseTaskParams, AgentTaskResponse>;

impl JobParams for BrowserUseTaskParams {}

impl JobParams for ComputerUseTaskParams {}

/// Agent task families.
#[derive(Clone)]
pub struct AgentsService {
    browser_use: BrowserUseService,
    cua: ComputerUseService,
    claude_computer_use: ComputerUseService,
    gemini_computer_use: ComputerUseService,
    hyper_agent: ComputerUseService,
}

impl AgentsService {
    pub(crate) fn new(transport: HttpTransport, poll: PollConfig) -> Self {
        Self {
            browser_use: JobService::new(transport.clone(), BROWSER_USE, poll.clone()),
            cua: JobService::new(transport.clone(), CUA, poll.clone()),
            claude_computer_use: JobService::new(transport.clone(), CLAUDE_COMPUTER_USE, poll.clone()),
            gemini_computer_use: JobService::new(transport.clone(), GEMINI_COMPUTER_USE, poll.clone()),
            hyper_agent: JobService::new(transport, HYPER_AGENT, poll),
        }
    }

    pub fn browser_use(&self) -> &BrowserUseService {
        &self.browser_use
    }

    pub fn cua(&self) -> &ComputerUseService {
        &self.cua
    }

    pub fn claude_computer_use(&self) -> &ComputerUseService {
        &self.claude_computer_use
    }

    pub fn gemini_computer_use(&self) -> &ComputerUseService {
        &self.gemini_computer_use
    }

    pub fn hyper_agent(&self) -> &ComputerUseService {
        &self.hyper_agent
    }
}
