mod allocation;
mod avatar;
mod capacity_flow;
mod recommendations;
mod validation;
mod worklogs;
