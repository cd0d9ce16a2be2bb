pub mod mission_plan {
    pub mod mission_plan_route;
}

pub mod nebula {
    pub mod nebula_structurer_route;
}

pub mod health {
    pub mod health_response;
    pub mod health_route;
}
