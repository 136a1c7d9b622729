//! Canned upstream payloads shaped like the real board responses.

use std::ops::RangeInclusive;

use serde_json::{json, Value};

pub fn ashby_board() -> Value {
    json!({
        "data": {
            "jobBoard": {
                "jobPostings": [
                    {
                        "id": "9f1c2a",
                        "title": "Platform Engineer",
                        "locationName": "Berlin",
                        "employmentType": "FullTime",
                        "secondaryLocations": [{"locationName": "Remote (EU)"}]
                    },
                    {
                        "id": "77aa01",
                        "title": "Designer",
                        "locationName": "London",
                        "employmentType": "FullTime",
                        "secondaryLocations": []
                    }
                ]
            }
        }
    })
}

pub fn bamboohr_list() -> Value {
    json!({
        "meta": {"totalCount": 2},
        "result": [
            {
                "id": "31",
                "jobOpeningName": "Office Manager",
                "location": {"city": "Denver", "state": "Colorado"}
            },
            {
                "id": 32,
                "jobOpeningName": "Field Technician",
                "location": {"city": "Calgary", "state": null, "addressCountry": "Canada"}
            }
        ]
    })
}

pub fn lever_postings() -> Value {
    json!([
        {
            "id": "5d1e-aa",
            "text": "Data Analyst",
            "hostedUrl": "https://jobs.lever.co/acme/5d1e-aa",
            "categories": {"location": "Toronto"}
        },
        {
            "id": "5d1e-bb",
            "text": "Account Executive",
            "hostedUrl": null,
            "categories": {"location": "Chicago"}
        }
    ])
}

/// One Workable results page with openings numbered by `ids`.
pub fn workable_page(ids: RangeInclusive<u32>, next_page: &str) -> Value {
    let results: Vec<Value> = ids
        .map(|id| {
            json!({
                "id": id,
                "shortcode": format!("W{}", id),
                "title": format!("Role {}", id),
                "location": {"city": "Athens", "region": "", "country": "Greece"}
            })
        })
        .collect();

    json!({
        "total": 8,
        "results": results,
        "nextPage": if next_page.is_empty() { Value::Null } else { json!(next_page) },
    })
}

pub const GREENHOUSE_BOARD: &str = r#"<!DOCTYPE html>
<html>
  <body>
    <section class="level-0">
      <h3>Engineering</h3>
      <div class="opening" department_id="1" office_id="2">
        <a data-mapped="true" href="/acme/jobs/4001">Site Reliability Engineer</a>
        <br>
        <span class="location">Dublin, Ireland</span>
      </div>
      <div class="opening">
        <a href="https://boards.greenhouse.io/acme/jobs/4002">Security Engineer</a>
        <span class="location">Remote</span>
      </div>
      <div class="opening">
        <span class="location">Orphaned opening without a link</span>
      </div>
    </section>
  </body>
</html>"#;
