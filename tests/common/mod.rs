#![allow(dead_code)]

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use estate_admin::EstateAdmin;
use serde_json::{json, Value};
use wiremock::MockServer;

pub fn admin_for(server: &MockServer) -> EstateAdmin {
    EstateAdmin::new(&server.uri()).expect("mock server URI is valid")
}

pub fn unsigned_jwt(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"a1","exp":{}}}"#, exp));
    let signature = URL_SAFE_NO_PAD.encode("not-a-real-signature");
    format!("{}.{}.{}", header, claims, signature)
}

pub fn user_json(id: &str, role: &str) -> Value {
    json!({
        "_id": id,
        "firstName": "Test",
        "lastName": id,
        "email": format!("{}@example.com", id),
        "role": role
    })
}

pub fn project_json(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "developer": "Emaar",
        "description": "Gated compound",
        "location": "New Cairo",
        "image": format!("https://cdn.example.com/{}.jpg", id),
        "features": ["Parking In The Area", "Balcony"]
    })
}

pub fn property_json(id: &str, title: &str) -> Value {
    json!({
        "_id": id,
        "title": title,
        "description": "Sea view",
        "type": "chalet",
        "areaRange": "100_to_150",
        "priceRange": "1_to_2_million",
        "status": "available",
        "bedrooms": 2,
        "bathrooms": 1,
        "images": ["https://cdn.example.com/c.jpg"],
        "project": "p1"
    })
}

pub fn data(value: Value) -> Value {
    json!({ "data": value })
}
